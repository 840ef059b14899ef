//! Layout presets and derived frame geometry
//!
//! All sizes are in pixels of the abacus's local (offset-corrected) space.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_RODS;

/// Horizontal bead and rod dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalLayout {
    pub bead_width: f32,
    /// Width of the hole the rod passes through
    pub bead_hole: f32,
    /// Horizontal gap between adjacent columns
    pub bead_gap: f32,
    pub rod_width: f32,
}

/// Vertical bead, deck and beam dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalLayout {
    pub bead_height: f32,
    /// Thickness of the bead's outer rim
    pub bead_extra: f32,
    pub upper_deck_beads: usize,
    pub beam_height: f32,
    pub lower_deck_beads: usize,
    /// Digit readout font size
    pub font_size: f32,
}

/// Display size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSize {
    Small,
    #[default]
    Medium,
    Large,
    Big,
}

impl LayoutSize {
    pub const ALL: [LayoutSize; 4] = [
        LayoutSize::Small,
        LayoutSize::Medium,
        LayoutSize::Large,
        LayoutSize::Big,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutSize::Small => "small",
            LayoutSize::Medium => "medium",
            LayoutSize::Large => "large",
            LayoutSize::Big => "big",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "small" => Some(LayoutSize::Small),
            "medium" => Some(LayoutSize::Medium),
            "large" => Some(LayoutSize::Large),
            "big" => Some(LayoutSize::Big),
            _ => None,
        }
    }

    pub fn horizontal(&self) -> HorizontalLayout {
        let (bead_width, bead_hole, bead_gap, rod_width) = match self {
            LayoutSize::Small => (50.0, 12.0, 3.0, 10.0),
            LayoutSize::Medium => (72.0, 16.0, 3.0, 12.0),
            LayoutSize::Large => (92.0, 18.0, 4.0, 14.0),
            LayoutSize::Big => (128.0, 24.0, 5.0, 18.0),
        };
        HorizontalLayout {
            bead_width,
            bead_hole,
            bead_gap,
            rod_width,
        }
    }

    pub fn vertical(&self) -> VerticalLayout {
        let (bead_height, bead_extra, beam_height, font_size) = match self {
            LayoutSize::Small => (34.0, 2.0, 22.0, 45.0),
            LayoutSize::Medium => (48.0, 2.0, 24.0, 60.0),
            LayoutSize::Large => (62.0, 3.0, 28.0, 75.0),
            LayoutSize::Big => (86.0, 4.0, 38.0, 90.0),
        };
        VerticalLayout {
            bead_height,
            bead_extra,
            upper_deck_beads: 1,
            beam_height,
            lower_deck_beads: 4,
            font_size,
        }
    }
}

impl HorizontalLayout {
    /// Distance between the centers of adjacent rods
    #[inline]
    pub fn column_pitch(&self) -> f32 {
        self.bead_width + self.bead_gap
    }

    /// Horizontal center of a rod. Place 0 is the rightmost rod.
    #[inline]
    pub fn rod_center(&self, place: usize, rods: usize) -> f32 {
        (rods as f32 - place as f32 - 1.0) * self.column_pitch() + self.bead_width / 2.0
    }

    /// Width of the frame holding `rods` columns
    pub fn frame_width(&self, rods: usize) -> f32 {
        if rods == 0 {
            return 0.0;
        }
        rods as f32 * self.column_pitch() - self.bead_gap
    }

    /// Number of rods that fit in a panel of the given width
    pub fn visible_rods_for_width(&self, width: f32) -> usize {
        // Frame border plus some margin
        let margin = 40.0 + self.bead_gap;
        let fit = ((width - margin) / self.column_pitch()).floor();
        if fit.is_nan() || fit < 1.0 {
            1
        } else {
            (fit as usize).min(MAX_RODS)
        }
    }
}

impl VerticalLayout {
    pub fn upper_deck_height(&self) -> f32 {
        (self.bead_height * (self.upper_deck_beads as f32 + 0.5)).round()
    }

    pub fn lower_deck_height(&self) -> f32 {
        (self.bead_height * (self.lower_deck_beads as f32 + 0.5)).round()
    }

    /// Top edge of the beam
    #[inline]
    pub fn beam_top(&self) -> f32 {
        self.upper_deck_height()
    }

    /// Bottom edge of the beam
    #[inline]
    pub fn beam_bottom(&self) -> f32 {
        self.beam_top() + self.beam_height
    }

    pub fn frame_height(&self) -> f32 {
        self.upper_deck_height() + self.beam_height + self.lower_deck_height()
    }

    /// True when rods built for `self` and `other` have identical bounds and counts
    pub fn same_structure(&self, other: &VerticalLayout) -> bool {
        self.bead_height == other.bead_height
            && self.beam_height == other.beam_height
            && self.upper_deck_beads == other.upper_deck_beads
            && self.lower_deck_beads == other.lower_deck_beads
    }
}

impl Default for HorizontalLayout {
    fn default() -> Self {
        LayoutSize::default().horizontal()
    }
}

impl Default for VerticalLayout {
    fn default() -> Self {
        LayoutSize::default().vertical()
    }
}
