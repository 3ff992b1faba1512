//! The seam between a scene and the rendering host.
//!
//! The host owns the graphics context, the camera texture stream, and the
//! per-frame call order. A scene only reads the camera texture handle and
//! submits recorded [`Frame`]s.

use crate::error::HostError;
use crate::frame::{Frame, TextureId};

/// Services a rendering host provides to a scene.
pub trait SceneHost {
    /// Baseline context setup (projection, client state, texture target).
    fn init_baseline(&mut self) -> Result<(), HostError>;

    /// Texture holding the latest camera frame.
    fn camera_texture(&self) -> TextureId;

    /// Generic texture-streaming step; pulls the next camera frame into
    /// [`camera_texture`](Self::camera_texture).
    fn update_texture(&mut self) -> Result<(), HostError>;

    /// Execute one recorded frame.
    fn submit(&mut self, frame: &Frame) -> Result<(), HostError>;
}

/// Host that records every submitted frame. Used by tests and for dry runs.
#[derive(Debug)]
pub struct RecordingHost {
    pub texture: TextureId,
    pub frames: Vec<Frame>,
    pub texture_updates: u32,
    /// Error returned by the next `init_baseline` call.
    pub fail_init: Option<HostError>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            texture: TextureId(1),
            frames: Vec::new(),
            texture_updates: 0,
            fail_init: None,
        }
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_init(error: HostError) -> Self {
        Self {
            fail_init: Some(error),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl SceneHost for RecordingHost {
    fn init_baseline(&mut self) -> Result<(), HostError> {
        match self.fail_init.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn camera_texture(&self) -> TextureId {
        self.texture
    }

    fn update_texture(&mut self) -> Result<(), HostError> {
        self.texture_updates += 1;
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> Result<(), HostError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
