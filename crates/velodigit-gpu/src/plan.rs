//! Flattening a recorded [`Frame`] into GPU passes.
//!
//! Every draw is expanded into world-space vertices in one shared buffer.
//! Consecutive draws with the same pipeline state and texture collapse into a
//! single [`DrawRun`]; a `Clear` command starts a new render pass.

use std::ops::Range;

use velodigit_core::{Command, Frame, Rgba, TextureId};

use crate::buffers::OverlayVertex;

/// Fixed-function state that selects a render pipeline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelineKey {
    pub depth_test: bool,
    pub blend: bool,
}

impl PipelineKey {
    pub const ALL: [PipelineKey; 4] = [
        PipelineKey {
            depth_test: false,
            blend: false,
        },
        PipelineKey {
            depth_test: false,
            blend: true,
        },
        PipelineKey {
            depth_test: true,
            blend: false,
        },
        PipelineKey {
            depth_test: true,
            blend: true,
        },
    ];

    pub fn index(self) -> usize {
        ((self.depth_test as usize) << 1) | (self.blend as usize)
    }
}

/// Contiguous vertices drawn with one pipeline and one texture.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRun {
    pub key: PipelineKey,
    pub texture: Option<TextureId>,
    pub vertices: Range<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassPlan {
    /// Colour and depth to clear to, or `None` to keep the previous contents.
    pub clear: Option<(Rgba, f32)>,
    pub runs: Vec<DrawRun>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePlan {
    pub vertices: Vec<OverlayVertex>,
    pub passes: Vec<PassPlan>,
}

impl FramePlan {
    pub fn draw_run_count(&self) -> usize {
        self.passes.iter().map(|p| p.runs.len()).sum()
    }
}

/// Build a plan for `frame`. State starts from GL defaults: depth test and
/// blending off, colour white.
pub fn plan_frame(frame: &Frame) -> FramePlan {
    let mut plan = FramePlan::default();
    let mut key = PipelineKey::default();
    let mut color = Rgba::WHITE;

    for command in frame.commands() {
        match command {
            Command::Clear { color, depth } => plan.passes.push(PassPlan {
                clear: Some((*color, *depth)),
                runs: Vec::new(),
            }),
            Command::SetDepthTest(on) => key.depth_test = *on,
            Command::SetBlend(on) => key.blend = *on,
            Command::SetColor(c) => color = *c,
            Command::Draw(draw) => {
                let start = plan.vertices.len() as u32;
                let positions = draw.world_vertices();
                match draw.tex_coords() {
                    Some(uvs) => plan.vertices.extend(
                        positions
                            .iter()
                            .zip(uvs)
                            .map(|(p, uv)| OverlayVertex::new(*p, *uv, color)),
                    ),
                    None => plan.vertices.extend(
                        positions
                            .iter()
                            .map(|p| OverlayVertex::new(*p, [0.0, 0.0], color)),
                    ),
                }
                let end = plan.vertices.len() as u32;

                let runs = &mut current_pass(&mut plan.passes).runs;
                match runs.last_mut() {
                    Some(run)
                        if run.key == key
                            && run.texture == draw.texture
                            && run.vertices.end == start =>
                    {
                        run.vertices.end = end;
                    }
                    _ => runs.push(DrawRun {
                        key,
                        texture: draw.texture,
                        vertices: start..end,
                    }),
                }
            }
        }
    }
    plan
}

/// Pass that draws are appended to; opens a loading pass when the frame
/// starts without a clear.
fn current_pass(passes: &mut Vec<PassPlan>) -> &mut PassPlan {
    if passes.is_empty() {
        passes.push(PassPlan {
            clear: None,
            runs: Vec::new(),
        });
    }
    let last = passes.len() - 1;
    &mut passes[last]
}
