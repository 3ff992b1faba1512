//! Velodigit Core — camera preview scene with a seven-segment speed readout.
//!
//! This crate holds the static geometry, glyph table, readout layout, and
//! scene lifecycle. It records draw commands; executing them is the host's
//! job (see `velodigit-gpu`). No GPU or framework dependencies.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod glyph;
pub mod host;
pub mod layout;
pub mod scene;

// Re-exports for convenience.
pub use config::{LabelStyle, SceneConfig};
pub use error::{HostError, SceneError};
pub use frame::{Command, DrawCall, Frame, Primitive, Rgba, TextureId};
pub use glyph::{Glyph, Segment};
pub use host::{RecordingHost, SceneHost};
pub use scene::{AnimationState, Readout, SceneOps, SpeedometerScene, open};
