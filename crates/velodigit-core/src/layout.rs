//! Seven-segment readout layout.
//!
//! Each function turns a glyph, number, or label into [`DrawCall`]s at a
//! given anchor. Nothing here mutates shared state; composing calls is just
//! concatenating their outputs.

use crate::frame::{DrawCall, Primitive};
use crate::geometry::{POINT_DROP, SEG_UNIT, SEG_WIDTH};
use crate::glyph::Glyph;

/// Largest value the three-digit readout can show.
pub const MAX_DISPLAY_VALUE: f32 = 99.9;

/// Horizontal advance between two glyph cells.
const CELL_ADVANCE: f32 = 1.2 * SEG_UNIT;
const POINT_OFFSET: f32 = 2.425 * SEG_UNIT;
const TENTHS_OFFSET: f32 = (2.55 + SEG_WIDTH) * SEG_UNIT;
const NUMBER_OFFSET: f32 = 2.4 * SEG_UNIT;

/// The three digits shown for a value: `tens units . tenths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalDigits {
    pub tens: u8,
    pub units: u8,
    pub tenths: u8,
}

impl DecimalDigits {
    /// Split `value` into digits by truncation, never rounding:
    /// `floor(v / 10)`, `floor(v)` and `floor(v * 10)`, each mod 10.
    ///
    /// NaN and negative values show as `00.0`; values above
    /// [`MAX_DISPLAY_VALUE`] show as `99.9`.
    pub fn from_value(value: f32) -> Self {
        let v = clamp_display_value(value);
        let digit = |x: f32| (x.floor() as u32 % 10) as u8;
        Self {
            tens: digit(v / 10.0),
            units: digit(v),
            tenths: digit(v * 10.0),
        }
    }

    /// The digits as glyphs, most significant first.
    pub fn glyphs(self) -> [Glyph; 3] {
        // Each field is reduced mod 10 above.
        [self.tens, self.units, self.tenths].map(|d| Glyph::ALL[d as usize])
    }
}

/// Clamp a readout value into `[0, MAX_DISPLAY_VALUE]`, mapping NaN to 0.
pub fn clamp_display_value(value: f32) -> f32 {
    if value.is_nan() || value <= 0.0 {
        if value != 0.0 {
            tracing::debug!(value, "readout value below range, showing 0");
        }
        0.0
    } else if value > MAX_DISPLAY_VALUE {
        tracing::debug!(value, "readout value above range, showing {MAX_DISPLAY_VALUE}");
        MAX_DISPLAY_VALUE
    } else {
        value
    }
}

/// One stroke anchored at `(x, y)`, rotated by `angle_degrees`.
pub fn segment(x: f32, y: f32, angle_degrees: f32) -> DrawCall {
    DrawCall::overlay(Primitive::Segment, x, y, angle_degrees)
}

/// Decimal point for a cell anchored at `(x, y)`; it sits at the cell's baseline.
pub fn point(x: f32, y: f32) -> DrawCall {
    DrawCall::overlay(Primitive::Point, x, y - POINT_DROP, 0.0)
}

/// Strokes for `glyph` in the cell anchored at `(x, y)`.
pub fn digit(glyph: Glyph, x: f32, y: f32) -> Vec<DrawCall> {
    glyph
        .lit_segments()
        .map(|s| {
            let [dx, dy] = s.offset();
            segment(x + dx, y + dy, s.angle_degrees())
        })
        .collect()
}

/// `value` as `tens units . tenths` starting at `(x, y)`.
pub fn number(value: f32, x: f32, y: f32) -> Vec<DrawCall> {
    let [tens, units, tenths] = DecimalDigits::from_value(value).glyphs();
    let mut draws = digit(tens, x, y);
    draws.extend(digit(units, x + CELL_ADVANCE, y));
    draws.push(point(x + POINT_OFFSET, y));
    draws.extend(digit(tenths, x + TENTHS_OFFSET, y));
    draws
}

/// `label = value` starting at `(x, y)`.
pub fn labelled_number(label: Glyph, value: f32, x: f32, y: f32) -> Vec<DrawCall> {
    let mut draws = digit(label, x, y);
    draws.extend(digit(Glyph::Eq, x + CELL_ADVANCE, y));
    draws.extend(number(value, x + NUMBER_OFFSET, y));
    draws
}

/// `V = speed`.
pub fn speed(value: f32, x: f32, y: f32) -> Vec<DrawCall> {
    labelled_number(Glyph::V, value, x, y)
}

/// `M = average speed`.
pub fn average_speed(value: f32, x: f32, y: f32) -> Vec<DrawCall> {
    labelled_number(Glyph::M, value, x, y)
}

/// Number of draw calls [`labelled_number`] emits for `label` and `value`.
pub fn labelled_draw_count(label: Glyph, value: f32) -> usize {
    let lit = |g: Glyph| g.lit_segments().count();
    let digits: usize = DecimalDigits::from_value(value)
        .glyphs()
        .into_iter()
        .map(lit)
        .sum();
    lit(label) + lit(Glyph::Eq) + digits + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Segment;

    const EPSILON: f32 = 1e-6;

    fn digits(tens: u8, units: u8, tenths: u8) -> DecimalDigits {
        DecimalDigits {
            tens,
            units,
            tenths,
        }
    }

    #[test]
    fn test_decompose_truncates_instead_of_rounding() {
        assert_eq!(DecimalDigits::from_value(25.6), digits(2, 5, 6));
        assert_eq!(DecimalDigits::from_value(25.3), digits(2, 5, 3));
        assert_eq!(DecimalDigits::from_value(7.99), digits(0, 7, 9));
        assert_eq!(DecimalDigits::from_value(0.05), digits(0, 0, 0));
        assert_eq!(DecimalDigits::from_value(99.9), digits(9, 9, 9));
    }

    #[test]
    fn test_decompose_matches_floor_laws_across_range() {
        for tenths in 0..=999u32 {
            let v = tenths as f32 / 10.0 + 0.05;
            if v > MAX_DISPLAY_VALUE {
                continue;
            }
            assert_floor_laws(v);
        }
    }

    fn assert_floor_laws(v: f32) {
        let d = DecimalDigits::from_value(v);
        assert_eq!(d.tens as u32, ((v / 10.0).floor() as u32) % 10, "tens v={v}");
        assert_eq!(d.units as u32, (v.floor() as u32) % 10, "units v={v}");
        assert_eq!(d.tenths as u32, ((v * 10.0).floor() as u32) % 10, "tenths v={v}");
    }

    #[test]
    fn test_values_just_below_a_boundary_are_not_rounded_up() {
        assert_eq!(DecimalDigits::from_value(9.99999), digits(0, 9, 9));
        assert_eq!(DecimalDigits::from_value(19.99999), digits(1, 9, 9));
        assert_eq!(DecimalDigits::from_value(0.09999), digits(0, 0, 0));
        for v in [9.99999, 19.99999, 0.09999] {
            assert_floor_laws(v);
        }
        for k in 1..=999u32 {
            // Largest f32 below k / 10.
            let boundary = k as f32 / 10.0;
            assert_floor_laws(f32::from_bits(boundary.to_bits() - 1));
        }
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(DecimalDigits::from_value(-3.2), digits(0, 0, 0));
        assert_eq!(DecimalDigits::from_value(f32::NAN), digits(0, 0, 0));
        assert_eq!(DecimalDigits::from_value(120.0), digits(9, 9, 9));
        assert_eq!(DecimalDigits::from_value(f32::INFINITY), digits(9, 9, 9));
    }

    #[test]
    fn test_digit_draws_exactly_the_lit_segments() {
        for glyph in Glyph::ALL {
            let draws = digit(glyph, 0.3, -0.2);
            let lit: Vec<Segment> = glyph.lit_segments().collect();
            assert_eq!(draws.len(), lit.len(), "{glyph}");
            for (draw, seg) in draws.iter().zip(&lit) {
                let [dx, dy] = seg.offset();
                let [x, y] = draw.origin();
                assert!((x - (0.3 + dx)).abs() < EPSILON, "{glyph} {seg:?}");
                assert!((y - (-0.2 + dy)).abs() < EPSILON, "{glyph} {seg:?}");
                assert_eq!(draw.primitive, Primitive::Segment);
            }
        }
    }

    #[test]
    fn test_point_drops_below_anchor() {
        let [x, y] = point(0.5, 0.5).origin();
        assert!((x - 0.5).abs() < EPSILON);
        assert!((y - (0.5 - 0.21)).abs() < EPSILON);
    }

    #[test]
    fn test_number_layout_offsets() {
        let draws = number(88.8, 0.0, 0.0);
        // Three full cells plus the point.
        assert_eq!(draws.len(), 7 * 3 + 1);
        let point_draw = draws[14];
        assert_eq!(point_draw.primitive, Primitive::Point);
        assert!((point_draw.origin()[0] - 0.2425).abs() < EPSILON);
        let tenths_first = draws[15];
        assert!((tenths_first.origin()[0] - 0.27).abs() < EPSILON);
    }

    #[test]
    fn test_label_draw_count_formula() {
        for value in [0.0, 25.6, 25.3, 88.8, 99.9, -1.0] {
            let draws = speed(value, 0.25, 0.8);
            assert_eq!(draws.len(), labelled_draw_count(Glyph::V, value));
            assert_eq!(
                draws.iter().filter(|d| d.primitive == Primitive::Point).count(),
                1
            );
        }
    }

    #[test]
    fn test_average_speed_starts_with_m() {
        let draws = average_speed(12.0, 0.0, 0.0);
        let m = digit(Glyph::M, 0.0, 0.0);
        assert_eq!(&draws[..m.len()], &m[..]);
    }
}
