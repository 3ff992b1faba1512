//! Runtime configuration for the demo.

use std::path::PathBuf;

/// Default number of frames to run.
const DEFAULT_FRAMES: u32 = 90;
/// Default target width.
const DEFAULT_WIDTH: u32 = 640;
/// Default target height.
const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Render target width in pixels.
    pub width: u32,
    /// Render target height in pixels.
    pub height: u32,
    /// Frames to drive through the scene lifecycle.
    pub frames: u32,
    /// Optional JSON scene config.
    pub scene_config: Option<PathBuf>,
    /// Optional still image used as the camera feed.
    pub camera_image: Option<PathBuf>,
    /// Where the last frame is written.
    pub output: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: env_or("VELODIGIT_WIDTH", DEFAULT_WIDTH),
            height: env_or("VELODIGIT_HEIGHT", DEFAULT_HEIGHT),
            frames: env_or("VELODIGIT_FRAMES", DEFAULT_FRAMES),
            scene_config: std::env::var_os("VELODIGIT_CONFIG").map(PathBuf::from),
            camera_image: std::env::var_os("VELODIGIT_CAMERA_IMAGE").map(PathBuf::from),
            output: std::env::var_os("VELODIGIT_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("velodigit.png")),
        }
    }
}

fn env_or(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
