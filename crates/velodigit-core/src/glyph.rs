//! Seven-segment glyphs.
//!
//! Digits `0`–`9` plus three pseudo-digits (`V`, `=`, `M`) that reuse the
//! seven-segment shape space for the readout labels. The segment mapping is a
//! total function over [`Glyph`], so there is no way to index past the table.

use std::fmt;

use crate::error::SceneError;
use crate::geometry::SEG_UNIT;

/// One physical stroke of a seven-segment cell, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    UpperLeft,
    LowerLeft,
    Top,
    Middle,
    Bottom,
    UpperRight,
    LowerRight,
}

impl Segment {
    /// All segments in table column order.
    pub const ALL: [Segment; 7] = [
        Segment::UpperLeft,
        Segment::LowerLeft,
        Segment::Top,
        Segment::Middle,
        Segment::Bottom,
        Segment::UpperRight,
        Segment::LowerRight,
    ];

    /// Offset of the stroke anchor from the glyph anchor.
    pub fn offset(self) -> [f32; 2] {
        let u = SEG_UNIT;
        match self {
            Self::UpperLeft => [0.0, 0.0],
            Self::LowerLeft => [0.0, -u - 0.05 * u],
            Self::Top => [0.075 * u, 0.0],
            Self::Middle => [0.075 * u, -u - 0.1 * u],
            Self::Bottom => [0.075 * u, -2.0 * u - 0.2 * u],
            Self::UpperRight => [u, 0.0],
            Self::LowerRight => [u, -u - 0.1 * u],
        }
    }

    /// Rotation in degrees; horizontal strokes are the vertical stroke turned by 90°.
    pub fn angle_degrees(self) -> f32 {
        match self {
            Self::Top | Self::Middle | Self::Bottom => 90.0,
            _ => 0.0,
        }
    }

    fn column(self) -> usize {
        self as usize
    }
}

/// A symbol drawable in one seven-segment cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    /// Speed label.
    V,
    /// Separator between label and value.
    Eq,
    /// Average-speed label.
    M,
}

// Columns follow `Segment::ALL`.
const SEGMENT_TABLE: [[bool; 7]; 13] = {
    const X: bool = true;
    const O: bool = false;
    [
        [X, X, X, O, X, X, X], // 0
        [O, O, O, O, O, X, X], // 1
        [O, X, X, X, X, X, O], // 2
        [O, O, X, X, X, X, X], // 3
        [X, O, O, X, O, X, X], // 4
        [X, O, X, X, X, O, X], // 5
        [X, X, X, X, X, O, X], // 6
        [O, O, X, O, O, X, X], // 7
        [X, X, X, X, X, X, X], // 8
        [X, O, X, X, X, X, X], // 9
        [X, X, O, O, X, X, X], // V
        [O, O, O, X, X, O, O], // =
        [X, X, X, O, O, X, X], // M
    ]
};

impl Glyph {
    /// Every glyph, ordered by code.
    pub const ALL: [Glyph; 13] = [
        Glyph::D0,
        Glyph::D1,
        Glyph::D2,
        Glyph::D3,
        Glyph::D4,
        Glyph::D5,
        Glyph::D6,
        Glyph::D7,
        Glyph::D8,
        Glyph::D9,
        Glyph::V,
        Glyph::Eq,
        Glyph::M,
    ];

    /// Glyph for a decimal digit, `None` above 9.
    pub fn from_digit(digit: u8) -> Option<Self> {
        if digit <= 9 {
            Some(Self::ALL[digit as usize])
        } else {
            None
        }
    }

    /// Numeric code of this glyph (digits map to themselves, `V`=10, `=`=11, `M`=12).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether `segment` is lit for this glyph.
    pub fn is_lit(self, segment: Segment) -> bool {
        SEGMENT_TABLE[self.code() as usize][segment.column()]
    }

    /// Lit segments in table column order.
    pub fn lit_segments(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.is_lit(*s))
    }
}

impl TryFrom<u8> for Glyph {
    type Error = SceneError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(SceneError::InvalidGlyph(code))
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V => write!(f, "V"),
            Self::Eq => write!(f, "="),
            Self::M => write!(f, "M"),
            digit => write!(f, "{}", digit.code()),
        }
    }
}
