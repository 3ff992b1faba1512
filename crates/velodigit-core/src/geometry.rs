//! Static vertex tables shared by every draw call.
//!
//! All coordinates are clip-space-ish units on a `[-1, 1]` square. The
//! background quad sits behind the overlay (`z = 0.8`), segment and point
//! strokes in front of it (`z = 0.25`).

/// Edge length of one segment stroke. Every overlay offset is a multiple of it.
pub const SEG_UNIT: f32 = 0.1;
/// Stroke thickness as a fraction of [`SEG_UNIT`].
pub const SEG_WIDTH: f32 = 0.15;

/// Depth of the camera quad.
pub const QUAD_DEPTH: f32 = 0.8;
/// Depth of the overlay strokes.
pub const OVERLAY_DEPTH: f32 = 0.25;

const STROKE: f32 = SEG_UNIT * SEG_WIDTH;
const HALF_STROKE: f32 = 0.5 * STROKE;
const TIP: f32 = -0.1 * SEG_UNIT;
const TAIL: f32 = -0.9 * SEG_UNIT;
const END: f32 = -SEG_UNIT;

// v0----v1
// |     |
// v3----v2
const V0: [f32; 3] = [-1.0, 1.0, QUAD_DEPTH];
const V1: [f32; 3] = [1.0, 1.0, QUAD_DEPTH];
const V2: [f32; 3] = [1.0, -1.0, QUAD_DEPTH];
const V3: [f32; 3] = [-1.0, -1.0, QUAD_DEPTH];

/// Full-screen background quad, two triangles `v0 v3 v2` and `v2 v1 v0`.
pub const QUAD_VERTICES: [[f32; 3]; 6] = [V0, V3, V2, V2, V1, V0];

/// Texture coordinates matching [`QUAD_VERTICES`]; `(0, 0)` is the top-left texel.
pub const QUAD_TEX_COORDS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
];

/// One vertical stroke with pointed ends, anchored at its top-left corner
/// and extending down by [`SEG_UNIT`].
pub const SEGMENT_VERTICES: [[f32; 3]; 12] = [
    // upper tip
    [HALF_STROKE, 0.0, OVERLAY_DEPTH],
    [STROKE, TIP, OVERLAY_DEPTH],
    [0.0, TIP, OVERLAY_DEPTH],
    // body
    [STROKE, TIP, OVERLAY_DEPTH],
    [0.0, TIP, OVERLAY_DEPTH],
    [STROKE, TAIL, OVERLAY_DEPTH],
    [0.0, TIP, OVERLAY_DEPTH],
    [STROKE, TAIL, OVERLAY_DEPTH],
    [0.0, TAIL, OVERLAY_DEPTH],
    // lower tip
    [0.0, TAIL, OVERLAY_DEPTH],
    [HALF_STROKE, END, OVERLAY_DEPTH],
    [STROKE, TAIL, OVERLAY_DEPTH],
];

/// Square decimal-point marker, side `SEG_UNIT * SEG_WIDTH`.
pub const POINT_VERTICES: [[f32; 3]; 6] = [
    [0.0, 0.0, OVERLAY_DEPTH],
    [0.0, STROKE, OVERLAY_DEPTH],
    [STROKE, 0.0, OVERLAY_DEPTH],
    [STROKE, STROKE, OVERLAY_DEPTH],
    [0.0, STROKE, OVERLAY_DEPTH],
    [STROKE, 0.0, OVERLAY_DEPTH],
];

/// Vertical distance from a glyph anchor down to the decimal point.
pub const POINT_DROP: f32 = 2.1 * SEG_UNIT;

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[[f32; 3]]) -> ([f32; 2], [f32; 2]) {
        let mut min = [f32::MAX; 2];
        let mut max = [f32::MIN; 2];
        for v in vertices {
            for axis in 0..2 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        (min, max)
    }

    #[test]
    fn test_segment_spans_one_unit_downwards() {
        let (min, max) = bounds(&SEGMENT_VERTICES);
        assert!((min[0] - 0.0).abs() < 1e-6);
        assert!((max[0] - SEG_UNIT * SEG_WIDTH).abs() < 1e-6);
        assert!((max[1] - 0.0).abs() < 1e-6);
        assert!((min[1] + SEG_UNIT).abs() < 1e-6);
    }

    #[test]
    fn test_quad_covers_clip_space_behind_overlay() {
        let (min, max) = bounds(&QUAD_VERTICES);
        assert_eq!(min, [-1.0, -1.0]);
        assert_eq!(max, [1.0, 1.0]);
        assert!(QUAD_VERTICES.iter().all(|v| v[2] > OVERLAY_DEPTH));
        assert_eq!(QUAD_VERTICES.len(), QUAD_TEX_COORDS.len());
    }

    #[test]
    fn test_point_is_square() {
        let (min, max) = bounds(&POINT_VERTICES);
        assert!(((max[0] - min[0]) - (max[1] - min[1])).abs() < 1e-6);
    }
}
