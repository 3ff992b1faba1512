//! Velodigit GPU — wgpu host that executes recorded scene frames.
//!
//! This crate owns all GPU resources. The scene in `velodigit-core` only
//! records commands; [`WgpuHost`] turns them into render passes over an
//! offscreen target that can be read back.

pub mod buffers;
pub mod error;
pub mod host;
pub mod plan;
pub mod readback;
pub mod renderer;

pub use error::GpuError;
pub use host::{CAMERA_TEXTURE_ID, HostConfig, WgpuHost};
pub use plan::{FramePlan, plan_frame};
pub use readback::TargetPixels;
