//! Digit decoding
//!
//! Beads are classified by how close they sit to either end of their travel
//! band. The accepted slack grows with the number of beads stacked against
//! that end, since hand-placed stacks rarely sit exactly flush.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::rod::{Direction, Rod, RodSection};
use crate::consts::{DIGIT_SLACK_BASE, DIGIT_SLACK_PER_BEAD};
use crate::layout::VerticalLayout;

/// Where a bead sits along its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeadPlacement {
    /// Near the `y1` end
    Bottom,
    /// Near the `y2` end
    Top,
    /// Somewhere in between
    Loose,
}

/// Classify bead `i` of a section
pub fn classify_bead(section: &RodSection, i: usize, bead_height: f32) -> BeadPlacement {
    let n = section.beads.len();
    let y = section.beads[i].y;
    let (min_y, max_y) = section.travel_band(i, bead_height);
    let below = DIGIT_SLACK_PER_BEAD * (i + 1) as f32 + DIGIT_SLACK_BASE;
    let above = DIGIT_SLACK_PER_BEAD * (n - i) as f32 + DIGIT_SLACK_BASE;
    if y < min_y + below {
        BeadPlacement::Bottom
    } else if y > max_y - above {
        BeadPlacement::Top
    } else {
        BeadPlacement::Loose
    }
}

/// Value of one section, or `None` while any bead is loose
pub fn section_value(section: &RodSection, bead_height: f32) -> Option<u32> {
    let mut bottom = 0;
    let mut top = 0;
    for i in 0..section.beads.len() {
        match classify_bead(section, i, bead_height) {
            BeadPlacement::Bottom => bottom += 1,
            BeadPlacement::Top => top += 1,
            BeadPlacement::Loose => return None,
        }
    }
    // Beads count once moved away from their rest edge
    let counted = match section.direction {
        Direction::Top => bottom,
        Direction::Bottom => top,
    };
    Some(counted * u32::from(section.factor))
}

/// Digit shown by a rod, or `None` when it is mid-gesture
pub fn rod_digit(rod: &Rod, bead_height: f32) -> Option<u32> {
    rod.sections
        .iter()
        .map(|section| section_value(section, bead_height))
        .sum()
}

/// Digit for every visible rod, keyed by place
pub fn digits(rods: &[Arc<Rod>], visible: usize, vertical: &VerticalLayout) -> BTreeMap<usize, Option<u32>> {
    rods.iter()
        .filter(|rod| rod.place < visible)
        .map(|rod| (rod.place, rod_digit(rod, vertical.bead_height)))
        .collect()
}

/// Number formed by the visible rods, `None` if any of them is indeterminate
///
/// Wide enough for a full frame: `MAX_RODS` digits stay below `u128::MAX`.
pub fn value(digits: &BTreeMap<usize, Option<u32>>) -> Option<u128> {
    let mut total: u128 = 0;
    // Highest place first
    for digit in digits.values().rev() {
        total = total * 10 + u128::from((*digit)?);
    }
    Some(total)
}
