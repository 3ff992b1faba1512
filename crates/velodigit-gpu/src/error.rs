use velodigit_core::{HostError, TextureId};

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("renderer used before init_baseline")]
    NotInitialized,

    #[error("draw references unknown texture {0:?}")]
    UnknownTexture(TextureId),

    #[error("camera frame is {actual} bytes, expected {expected}")]
    CameraFrameSize { expected: usize, actual: usize },

    #[error("invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("device poll failed: {0}")]
    Poll(String),

    #[error("buffer map failed: {0}")]
    Map(String),
}

impl GpuError {
    /// Stable code handed to the scene through [`HostError`].
    pub fn code(&self) -> i32 {
        match self {
            Self::NoAdapter => 1,
            Self::RequestDevice(_) => 2,
            Self::NotInitialized => 3,
            Self::UnknownTexture(_) => 4,
            Self::CameraFrameSize { .. } => 5,
            Self::InvalidSize { .. } => 6,
            Self::Poll(_) => 7,
            Self::Map(_) => 8,
        }
    }
}

impl From<GpuError> for HostError {
    fn from(e: GpuError) -> Self {
        HostError::new(e.code(), e.to_string())
    }
}
