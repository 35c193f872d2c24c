//! lumen - render a scene file (or the demo scene) to a PPM or PNG image.

mod cli;
mod logger;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_core::SceneDescription;
use lumen_renderer::{render, save_ppm, Camera, FrameBuffer, RenderConfig, Scene};

use cli::Args;

/// Output formats selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Ppm,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ppm") => Ok(Self::Ppm),
            Some("png") => Ok(Self::Png),
            _ => bail!(
                "Unsupported output file {}: use a .ppm or .png extension",
                path.display()
            ),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    let output_format = OutputFormat::from_path(&args.output)?;
    let scene_desc = load_scene(&args)?;

    if args.dump_scene {
        println!("{}", scene_desc.to_json_string()?);
        return Ok(());
    }

    let frame = render_now(&scene_desc, &args.render_config())?;
    write_buffer(&frame, &args.output, output_format)?;
    Ok(())
}

fn load_scene(args: &Args) -> Result<SceneDescription> {
    let mut scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the demo scene");
            SceneDescription::demo()
        }
    };

    args.apply_overrides(&mut scene);
    scene.validate().context("Invalid scene settings")?;
    Ok(scene)
}

/// Build the renderable scene and camera, then render a full frame.
fn render_now(desc: &SceneDescription, config: &RenderConfig) -> Result<FrameBuffer> {
    let scene = Scene::from_description(desc).context("Invalid scene")?;
    let camera = Camera::from_description(&desc.camera);
    let frame = render(&scene, &camera, config).context("Render failed")?;
    Ok(frame)
}

/// Write the current frame buffer to `path`.
fn write_buffer(frame: &FrameBuffer, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Ppm => save_ppm(path, frame)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        OutputFormat::Png => {
            frame
                .save_image(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Saved {}x{} PNG to {}", frame.width, frame.height, path.display());
        }
    }
    Ok(())
}
