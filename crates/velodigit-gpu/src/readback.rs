//! GPU-to-CPU readback of the render target.

use crate::buffers::RenderTarget;
use crate::error::GpuError;

/// Tightly packed RGBA8 pixels read from a render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TargetPixels {
    /// Pixel at `(x, y)`, origin top-left.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Pixel under a clip-space coordinate (`y` up).
    pub fn pixel_at_clip(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        let px = ((x + 1.0) * 0.5 * self.width as f32).floor();
        let py = ((1.0 - y) * 0.5 * self.height as f32).floor();
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px as u32, py as u32)
    }
}

/// Row pitch of a texture-to-buffer copy.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    (width * 4).div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Copy the target's colour attachment to the CPU. Blocks until complete.
pub fn download_target(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    target: &RenderTarget,
) -> Result<TargetPixels, GpuError> {
    let padded = padded_bytes_per_row(target.width);
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("velodigit_target_staging"),
        size: padded as u64 * target.height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("velodigit_target_download_encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target.color,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(target.height),
            },
        },
        wgpu::Extent3d {
            width: target.width,
            height: target.height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = std::sync::mpsc::channel();
    staging
        .slice(..)
        .map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|e| GpuError::Poll(e.to_string()))?;
    rx.recv()
        .map_err(|e| GpuError::Map(e.to_string()))?
        .map_err(|e| GpuError::Map(e.to_string()))?;

    let row_len = (target.width * 4) as usize;
    let mut rgba = Vec::with_capacity(row_len * target.height as usize);
    {
        let data = staging.slice(..).get_mapped_range();
        for row in data.chunks(padded as usize) {
            rgba.extend_from_slice(&row[..row_len]);
        }
    }
    staging.unmap();

    Ok(TargetPixels {
        width: target.width,
        height: target.height,
        rgba,
    })
}
