//! Recorded draw commands for one frame.
//!
//! Layout code never touches graphics state. It produces [`DrawCall`]s that
//! carry their own model transform, and the scene wraps them into a [`Frame`]
//! that a [`SceneHost`](crate::host::SceneHost) executes in order.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{POINT_VERTICES, QUAD_TEX_COORDS, QUAD_VERTICES, SEGMENT_VERTICES};

/// Straight RGBA colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const ORANGE: Self = Self::new(1.0, 0.6, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Opaque handle to a host-owned texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Static geometry a draw call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Full-screen camera quad, sampled from a texture.
    CameraQuad,
    /// One seven-segment stroke.
    Segment,
    /// Decimal-point marker.
    Point,
}

impl Primitive {
    /// Untransformed vertex positions, non-indexed triangle list.
    pub fn vertices(self) -> &'static [[f32; 3]] {
        match self {
            Self::CameraQuad => &QUAD_VERTICES,
            Self::Segment => &SEGMENT_VERTICES,
            Self::Point => &POINT_VERTICES,
        }
    }

    pub fn vertex_count(self) -> usize {
        self.vertices().len()
    }
}

/// A single non-indexed triangle draw with an explicit model transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub transform: Mat4,
    /// Texture sampled by the draw; only the camera quad carries one.
    pub texture: Option<TextureId>,
}

impl DrawCall {
    /// Camera quad drawn with `texture` and an identity transform.
    pub fn camera_quad(texture: TextureId) -> Self {
        Self {
            primitive: Primitive::CameraQuad,
            transform: Mat4::IDENTITY,
            texture: Some(texture),
        }
    }

    /// Untextured overlay primitive translated to `(x, y)` and rotated about z.
    pub fn overlay(primitive: Primitive, x: f32, y: f32, angle_degrees: f32) -> Self {
        let transform = Mat4::from_translation(Vec3::new(x, y, 0.0))
            * Mat4::from_rotation_z(angle_degrees.to_radians());
        Self {
            primitive,
            transform,
            texture: None,
        }
    }

    /// Model-space anchor of the draw (the translation part of its transform).
    pub fn origin(&self) -> [f32; 2] {
        let t = self.transform.w_axis;
        [t.x, t.y]
    }

    /// Vertex positions with the model transform applied.
    pub fn world_vertices(&self) -> Vec<[f32; 3]> {
        self.primitive
            .vertices()
            .iter()
            .map(|v| self.transform.transform_point3(Vec3::from_array(*v)).to_array())
            .collect()
    }

    /// Texture coordinates for textured primitives.
    pub fn tex_coords(&self) -> Option<&'static [[f32; 2]]> {
        match self.primitive {
            Primitive::CameraQuad => Some(&QUAD_TEX_COORDS),
            _ => None,
        }
    }
}

/// One step of a frame, executed by the host in recording order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Clear colour and depth buffers.
    Clear { color: Rgba, depth: f32 },
    SetDepthTest(bool),
    /// Source-alpha / one-minus-source-alpha blending.
    SetBlend(bool),
    /// Colour applied to subsequent untextured draws.
    SetColor(Rgba),
    Draw(DrawCall),
}

/// Ordered command list for one host submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<Command>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn extend_draws(&mut self, draws: impl IntoIterator<Item = DrawCall>) {
        self.commands.extend(draws.into_iter().map(Command::Draw));
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// All draw calls in submission order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.commands.iter().filter_map(|c| match c {
            Command::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    /// Draws paired with the colour active when they execute.
    pub fn colored_draws(&self) -> Vec<(Rgba, &DrawCall)> {
        let mut color = Rgba::WHITE;
        let mut out = Vec::new();
        for command in &self.commands {
            match command {
                Command::SetColor(c) => color = *c,
                Command::Draw(draw) => out.push((color, draw)),
                _ => {}
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_overlay_translation_moves_every_vertex() {
        let draw = DrawCall::overlay(Primitive::Point, 0.5, -0.25, 0.0);
        for (world, local) in draw.world_vertices().iter().zip(POINT_VERTICES.iter()) {
            assert!((world[0] - (local[0] + 0.5)).abs() < EPSILON);
            assert!((world[1] - (local[1] - 0.25)).abs() < EPSILON);
            assert!((world[2] - local[2]).abs() < EPSILON);
        }
        assert_eq!(draw.origin(), [0.5, -0.25]);
    }

    #[test]
    fn test_quarter_turn_lays_segment_flat() {
        let draw = DrawCall::overlay(Primitive::Segment, 0.0, 0.0, 90.0);
        let world = draw.world_vertices();
        let max_x = world.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        let min_y = world.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        assert!((max_x - 0.1).abs() < EPSILON, "max_x={max_x}");
        assert!(min_y > -EPSILON, "min_y={min_y}");
    }

    #[test]
    fn test_colored_draws_follow_set_color() {
        let mut frame = Frame::new();
        frame.push(Command::Draw(DrawCall::camera_quad(TextureId(1))));
        frame.push(Command::SetColor(Rgba::RED));
        frame.push(Command::Draw(DrawCall::overlay(Primitive::Point, 0.0, 0.0, 0.0)));
        let colored = frame.colored_draws();
        assert_eq!(colored.len(), 2);
        assert_eq!(colored[0].0, Rgba::WHITE);
        assert_eq!(colored[1].0, Rgba::RED);
    }

    #[test]
    fn test_only_camera_quad_has_tex_coords() {
        assert!(DrawCall::camera_quad(TextureId(3)).tex_coords().is_some());
        assert!(
            DrawCall::overlay(Primitive::Segment, 0.0, 0.0, 0.0)
                .tex_coords()
                .is_none()
        );
    }
}
