//! The speedometer scene and its lifecycle callbacks.
//!
//! The host calls [`SceneOps::gl_init`] once, then alternates
//! [`SceneOps::update_model`] and [`SceneOps::redraw`] every frame.

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::frame::{Command, DrawCall, Frame};
use crate::host::SceneHost;
use crate::layout;

/// Live values shown by the overlay, supplied by the host every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub speed: f32,
    pub average_speed: f32,
}

/// Per-frame animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Segment rotation in degrees. Reset every frame; rotation is disabled.
    pub angle: f32,
    /// Frame counter, wraps at `frames_per_loop`.
    pub step: u32,
    frames_per_loop: u32,
}

impl AnimationState {
    pub fn new(frames_per_loop: u32) -> Self {
        Self {
            angle: 0.0,
            step: 0,
            frames_per_loop: frames_per_loop.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.step = 0;
    }

    pub fn advance(&mut self) {
        self.angle = 0.0;
        self.step = (self.step + 1) % self.frames_per_loop;
    }

    pub fn frames_per_loop(&self) -> u32 {
        self.frames_per_loop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Updated,
    Rendered,
}

/// Callback table a host drives.
///
/// `update_texture` is not scene-specific; the default hands it to the host.
pub trait SceneOps<H: SceneHost> {
    fn gl_init(&mut self, host: &mut H) -> Result<(), SceneError>;

    fn update_model(&mut self, host: &mut H) -> Result<(), SceneError>;

    fn redraw(&mut self, host: &mut H, readout: &Readout) -> Result<(), SceneError>;

    fn update_texture(&mut self, host: &mut H) -> Result<(), SceneError> {
        host.update_texture()?;
        Ok(())
    }
}

/// Camera preview with a `V=` / `M=` seven-segment readout on top.
#[derive(Debug, Clone)]
pub struct SpeedometerScene {
    config: SceneConfig,
    animation: AnimationState,
    lifecycle: Lifecycle,
}

impl SpeedometerScene {
    pub fn new(config: SceneConfig) -> Self {
        let animation = AnimationState::new(config.frames_per_loop);
        Self {
            config,
            animation,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn clear_command(&self) -> Command {
        Command::Clear {
            color: self.config.clear_color,
            depth: self.config.clear_depth,
        }
    }

    /// Record the full frame for `readout` over the camera texture.
    pub fn build_frame(&self, camera: DrawCall, readout: &Readout) -> Frame {
        let speed = self.config.speed;
        let average = self.config.average_speed;

        let mut frame = Frame::new();
        frame.push(self.clear_command());
        frame.push(Command::SetDepthTest(true));
        frame.push(Command::SetBlend(true));
        frame.push(Command::Draw(camera));

        frame.push(Command::SetColor(speed.color));
        frame.extend_draws(layout::speed(
            readout.speed,
            speed.position[0],
            speed.position[1],
        ));

        frame.push(Command::SetColor(average.color));
        frame.extend_draws(layout::average_speed(
            readout.average_speed,
            average.position[0],
            average.position[1],
        ));

        frame.push(Command::SetColor(self.config.reset_color));
        frame
    }

    fn ensure_initialized(&self) -> Result<(), SceneError> {
        if self.lifecycle == Lifecycle::Uninitialized {
            return Err(SceneError::NotInitialized);
        }
        Ok(())
    }
}

impl Default for SpeedometerScene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl<H: SceneHost> SceneOps<H> for SpeedometerScene {
    fn gl_init(&mut self, host: &mut H) -> Result<(), SceneError> {
        self.animation.reset();

        if let Err(e) = host.init_baseline() {
            tracing::error!(code = e.code, "baseline init failed: {}", e.message);
            return Err(e.into());
        }

        let mut frame = Frame::new();
        frame.push(self.clear_command());
        host.submit(&frame)?;

        self.lifecycle = Lifecycle::Initialized;
        tracing::info!(
            frames_per_loop = self.animation.frames_per_loop(),
            "speedometer scene initialized"
        );
        Ok(())
    }

    fn update_model(&mut self, _host: &mut H) -> Result<(), SceneError> {
        self.ensure_initialized()?;
        self.animation.advance();
        self.lifecycle = Lifecycle::Updated;
        Ok(())
    }

    fn redraw(&mut self, host: &mut H, readout: &Readout) -> Result<(), SceneError> {
        self.ensure_initialized()?;
        let frame = self.build_frame(DrawCall::camera_quad(host.camera_texture()), readout);
        tracing::trace!(
            step = self.animation.step,
            commands = frame.commands().len(),
            "redraw"
        );
        host.submit(&frame)?;
        self.lifecycle = Lifecycle::Rendered;
        Ok(())
    }
}

/// Create the scene with default config, ready to be driven by a host.
pub fn open<H: SceneHost>() -> Box<dyn SceneOps<H>> {
    Box::new(SpeedometerScene::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    #[test]
    fn test_advance_wraps_at_period() {
        let mut anim = AnimationState::new(3);
        anim.advance();
        anim.advance();
        assert_eq!(anim.step, 2);
        anim.advance();
        assert_eq!(anim.step, 0);
    }

    #[test]
    fn test_zero_period_does_not_divide_by_zero() {
        let mut anim = AnimationState::new(0);
        anim.advance();
        assert_eq!(anim.step, 0);
    }

    #[test]
    fn test_update_before_init_is_rejected() {
        let mut host = RecordingHost::new();
        let mut scene = SpeedometerScene::default();
        let err = scene.update_model(&mut host).expect_err("not initialized");
        assert!(matches!(err, SceneError::NotInitialized));
        assert!(host.frames.is_empty());
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut host = RecordingHost::new();
        let mut scene = SpeedometerScene::default();
        assert_eq!(scene.lifecycle(), Lifecycle::Uninitialized);
        scene.gl_init(&mut host).unwrap();
        assert_eq!(scene.lifecycle(), Lifecycle::Initialized);
        scene.update_model(&mut host).unwrap();
        assert_eq!(scene.lifecycle(), Lifecycle::Updated);
        scene.redraw(&mut host, &Readout::default()).unwrap();
        assert_eq!(scene.lifecycle(), Lifecycle::Rendered);
    }

    #[test]
    fn test_update_texture_delegates_to_host() {
        let mut host = RecordingHost::new();
        let mut scene = open::<RecordingHost>();
        scene.update_texture(&mut host).unwrap();
        assert_eq!(host.texture_updates, 1);
    }
}
