//! Binary PPM (P6) reading and writing.
//!
//! Files are written top row first while the frame buffer keeps the bottom
//! row first, so both directions flip the rows. Writing and then reading a
//! frame gives back the same bytes.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::FrameBuffer;

/// Errors that can occur while reading or writing PPM files.
#[derive(Error, Debug)]
pub enum PpmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a binary PPM file (magic {0:?})")]
    BadMagic(String),

    #[error("Malformed PPM header: {0}")]
    BadHeader(String),

    #[error("Unsupported max value {0}, only 255 is supported")]
    UnsupportedMaxValue(u32),

    #[error("Pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Write `frame` as a P6 PPM.
pub fn write_ppm<W: Write>(mut writer: W, frame: &FrameBuffer) -> Result<(), PpmError> {
    write!(writer, "P6\n{} {}\n255\n", frame.width, frame.height)?;

    let row_len = frame.width as usize * 3;
    if row_len > 0 {
        for row in frame.as_bytes().chunks(row_len).rev() {
            writer.write_all(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a P6 PPM into a frame buffer.
pub fn read_ppm<R: BufRead>(mut reader: R) -> Result<FrameBuffer, PpmError> {
    let magic = read_token(&mut reader)?;
    if magic != "P6" {
        return Err(PpmError::BadMagic(magic));
    }
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let max_value = read_number(&mut reader, "max value")?;
    if max_value != 255 {
        return Err(PpmError::UnsupportedMaxValue(max_value));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| PpmError::BadHeader(format!("dimensions {width}x{height} too large")))?;

    // Grows with the bytes actually present, not with the header's claim
    let mut data = Vec::new();
    reader.take(expected as u64).read_to_end(&mut data)?;
    if data.len() < expected {
        return Err(PpmError::Truncated {
            expected,
            actual: data.len(),
        });
    }

    let row_len = width as usize * 3;
    let mut pixels = Vec::with_capacity(data.len());
    if row_len > 0 {
        for row in data.chunks(row_len).rev() {
            pixels.extend_from_slice(row);
        }
    }

    log::debug!("Read {}x{} PPM", width, height);
    FrameBuffer::from_raw(width, height, pixels)
        .ok_or_else(|| PpmError::BadHeader("pixel count does not match dimensions".to_string()))
}

/// Save `frame` to a PPM file.
pub fn save_ppm(path: impl AsRef<Path>, frame: &FrameBuffer) -> Result<(), PpmError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_ppm(BufWriter::new(file), frame)?;
    log::info!("Saved {}x{} PPM to {}", frame.width, frame.height, path.display());
    Ok(())
}

/// Load a PPM file.
pub fn load_ppm(path: impl AsRef<Path>) -> Result<FrameBuffer, PpmError> {
    let file = File::open(path)?;
    read_ppm(BufReader::new(file))
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> Result<u32, PpmError> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| PpmError::BadHeader(format!("invalid {what} {token:?}")))
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, so after the max
/// value the reader sits on the first pixel byte.
fn read_token<R: BufRead>(reader: &mut R) -> Result<String, PpmError> {
    let mut token = Vec::new();

    loop {
        let Some(byte) = next_byte(reader)? else {
            break;
        };
        match byte {
            b'#' if token.is_empty() => skip_line(reader)?,
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b),
        }
    }

    if token.is_empty() {
        return Err(PpmError::BadHeader("unexpected end of header".to_string()));
    }
    String::from_utf8(token).map_err(|_| PpmError::BadHeader("non-ASCII header".to_string()))
}

fn skip_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    while let Some(byte) = next_byte(reader)? {
        if byte == b'\n' {
            break;
        }
    }
    Ok(())
}

fn next_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = match reader.fill_buf()?.first() {
        Some(byte) => *byte,
        None => return Ok(None),
    };
    reader.consume(1);
    Ok(Some(byte))
}
