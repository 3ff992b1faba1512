//! Velodigit Demo — drives the speedometer scene headlessly and writes the
//! last frame to a PNG.

mod camera_source;
mod config;
mod telemetry;

use tracing_subscriber::EnvFilter;

use velodigit_core::{SceneConfig, SceneError, SceneOps, SpeedometerScene};
use velodigit_gpu::{GpuError, HostConfig, WgpuHost};

use camera_source::{CameraSource, CameraSourceError};
use config::DemoConfig;
use telemetry::SimulatedSpeed;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Camera(#[from] CameraSourceError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("readback returned {0} bytes for the target size")]
    Readback(usize),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VELODIGIT_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(DemoConfig::default()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: DemoConfig) -> Result<(), DemoError> {
    let scene_config = match &config.scene_config {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
                path: path.display().to_string(),
                source,
            })?;
            SceneConfig::from_json_str(&json)?
        }
        None => SceneConfig::default(),
    };

    let host_config = HostConfig {
        width: config.width,
        height: config.height,
        camera_width: config.width,
        camera_height: config.height,
    };
    let mut host = WgpuHost::create_blocking(host_config)?;
    let camera = match &config.camera_image {
        Some(path) => CameraSource::from_image(path, config.width, config.height)?,
        None => CameraSource::Gradient,
    };

    let mut scene = SpeedometerScene::new(scene_config);
    let mut speed = SimulatedSpeed::default();
    scene.gl_init(&mut host)?;

    for _ in 0..config.frames {
        let step = scene.animation().step;
        host.push_camera_frame(camera.frame(config.width, config.height, step))?;
        scene.update_texture(&mut host)?;
        scene.update_model(&mut host)?;
        let readout = speed.sample(step);
        scene.redraw(&mut host, &readout)?;
    }
    tracing::info!(frames = host.frames_submitted(), "render loop finished");

    let pixels = host.read_target()?;
    let len = pixels.rgba.len();
    let image = image::RgbaImage::from_raw(pixels.width, pixels.height, pixels.rgba)
        .ok_or(DemoError::Readback(len))?;
    image.save(&config.output)?;
    tracing::info!(path = %config.output.display(), "wrote final frame");
    Ok(())
}
