//! A [`SceneHost`] backed by wgpu and an offscreen render target.
//!
//! Stands in for the camera-preview host: it owns the device, the camera
//! texture, and the target, and executes the frames a scene submits.

use velodigit_core::{Frame, HostError, SceneHost, TextureId};

use crate::buffers::{COLOR_FORMAT, CameraTexture, RenderTarget};
use crate::error::GpuError;
use crate::plan::plan_frame;
use crate::readback::{TargetPixels, download_target};
use crate::renderer::OverlayRenderer;

/// Identifier the host hands out for its camera texture.
pub const CAMERA_TEXTURE_ID: TextureId = TextureId(1);

/// Sizes of the render target and the camera stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub width: u32,
    pub height: u32,
    pub camera_width: u32,
    pub camera_height: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            camera_width: 640,
            camera_height: 480,
        }
    }
}

/// Pipelines plus the bind group for the current camera texture.
/// Built by [`SceneHost::init_baseline`].
struct Baseline {
    renderer: OverlayRenderer,
    camera_bind_group: wgpu::BindGroup,
}

pub struct WgpuHost {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target: RenderTarget,
    camera: CameraTexture,
    baseline: Option<Baseline>,
    pending_camera_frame: Option<Vec<u8>>,
    frames_submitted: u64,
}

impl WgpuHost {
    /// Wrap an existing device and queue.
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        config: HostConfig,
    ) -> Result<Self, GpuError> {
        let target = RenderTarget::new(&device, config.width, config.height)?;
        let camera = CameraTexture::new(&device, config.camera_width, config.camera_height)?;
        Ok(Self {
            device,
            queue,
            target,
            camera,
            baseline: None,
            pending_camera_frame: None,
            frames_submitted: 0,
        })
    }

    /// Request an adapter and device and wrap them. Blocks on the async requests.
    pub fn create_blocking(config: HostConfig) -> Result<Self, GpuError> {
        let (device, queue) = pollster::block_on(request_device())?;
        Self::new(device, queue, config)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Queue a tightly packed RGBA8 camera frame for the next `update_texture`.
    pub fn push_camera_frame(&mut self, rgba: Vec<u8>) -> Result<(), GpuError> {
        if rgba.len() != self.camera.frame_len() {
            return Err(GpuError::CameraFrameSize {
                expected: self.camera.frame_len(),
                actual: rgba.len(),
            });
        }
        self.pending_camera_frame = Some(rgba);
        Ok(())
    }

    /// Read back the last rendered frame.
    pub fn read_target(&self) -> Result<TargetPixels, GpuError> {
        download_target(&self.device, &self.queue, &self.target)
    }

    fn execute(&mut self, frame: &Frame) -> Result<(), GpuError> {
        let baseline = self.baseline.as_ref().ok_or(GpuError::NotInitialized)?;
        let plan = plan_frame(frame);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("velodigit_frame_encoder"),
            });
        baseline.renderer.encode(
            &self.device,
            &mut encoder,
            &plan,
            &self.target,
            (CAMERA_TEXTURE_ID, &baseline.camera_bind_group),
        )?;
        self.queue.submit(std::iter::once(encoder.finish()));

        self.frames_submitted += 1;
        tracing::trace!(
            passes = plan.passes.len(),
            runs = plan.draw_run_count(),
            vertices = plan.vertices.len(),
            "frame submitted"
        );
        Ok(())
    }
}

impl SceneHost for WgpuHost {
    fn init_baseline(&mut self) -> Result<(), HostError> {
        let renderer = OverlayRenderer::new(&self.device, &self.queue, COLOR_FORMAT);
        let camera_bind_group = renderer.texture_bind_group(&self.device, &self.camera);
        self.baseline = Some(Baseline {
            renderer,
            camera_bind_group,
        });
        tracing::info!(
            width = self.target.width,
            height = self.target.height,
            "wgpu host baseline ready"
        );
        Ok(())
    }

    fn camera_texture(&self) -> TextureId {
        CAMERA_TEXTURE_ID
    }

    fn update_texture(&mut self) -> Result<(), HostError> {
        if let Some(rgba) = self.pending_camera_frame.take() {
            self.camera.upload(&self.queue, &rgba)?;
        }
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), HostError> {
        self.execute(frame).map_err(|e| {
            tracing::error!("frame submission failed: {e}");
            HostError::from(e)
        })
    }
}

async fn request_device() -> Result<(wgpu::Device, wgpu::Queue), GpuError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            ..Default::default()
        })
        .await
        .map_err(|_| GpuError::NoAdapter)?;

    let info = adapter.get_info();
    tracing::info!(adapter = %info.name, backend = ?info.backend, "using GPU adapter");

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("velodigit_device"),
            required_limits: adapter.limits(),
            ..Default::default()
        })
        .await?;
    Ok((device, queue))
}
