use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::SceneDescription;
use lumen_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Whitted-style ray tracer for spheres and triangles")]
pub struct Args {
    /// Scene file (JSON); renders the built-in demo scene when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Image width in pixels, overrides the scene camera
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overrides the scene camera
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees, overrides the scene camera
    #[arg(long)]
    pub fov: Option<f32>,

    /// Output file path (.ppm for binary PPM, .png for PNG)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Edge length of the square render buckets
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Render on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,

    /// Print the effective scene as JSON and exit without rendering
    #[arg(long)]
    pub dump_scene: bool,
}

impl Args {
    /// Apply the camera overrides given on the command line.
    pub fn apply_overrides(&self, scene: &mut SceneDescription) {
        if let Some(width) = self.width {
            scene.camera.width = width;
        }
        if let Some(height) = self.height {
            scene.camera.height = height;
        }
        if let Some(fov) = self.fov {
            scene.camera.fov_y_degrees = fov;
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            bucket_size: self.bucket_size,
            parallel: !self.sequential,
        }
    }
}
