//! Rod and bead state
//!
//! A rod holds its sections behind `Arc` and the rod array holds rods behind
//! `Arc`, so an update clones only what it touches (`Arc::make_mut`) and
//! callers can spot changed rods with `Arc::ptr_eq`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::VerticalLayout;

/// Float slack allowed when checking stacking invariants
const INVARIANT_EPSILON: f32 = 1e-3;

/// Rod array shared between ticks
pub type Rods = Vec<Arc<Rod>>;

/// Edge of a section the beads rest against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Beads rest at increasing y starting from `y1`
    Bottom,
    /// Beads rest ending at `y2`
    Top,
}

/// A single bead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    /// Center position along the rod
    pub y: f32,
    /// Marker bead (innermost lower-deck bead)
    pub header: bool,
}

/// One deck of a rod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodSection {
    /// Center of the topmost possible bead position
    pub y1: f32,
    /// Center of the bottommost possible bead position
    pub y2: f32,
    pub direction: Direction,
    /// Digit weight per bead moved against the beam
    pub factor: u8,
    /// Physical order is index order (ascending y)
    pub beads: Vec<Bead>,
}

impl RodSection {
    /// Allowed range for bead `i`, leaving room for the beads on both sides
    #[inline]
    pub fn travel_band(&self, i: usize, bead_height: f32) -> (f32, f32) {
        let n = self.beads.len();
        let min_y = self.y1 + i as f32 * bead_height;
        let max_y = self.y2 - (n - i - 1) as f32 * bead_height;
        (min_y, max_y)
    }

    /// Rest position of bead `i`
    #[inline]
    pub fn rest_position(&self, i: usize, bead_height: f32) -> f32 {
        let (min_y, max_y) = self.travel_band(i, bead_height);
        match self.direction {
            Direction::Bottom => min_y,
            Direction::Top => max_y,
        }
    }

    /// Whether every bead already sits at its rest position
    pub fn is_at_rest(&self, bead_height: f32) -> bool {
        self.beads
            .iter()
            .enumerate()
            .all(|(i, bead)| bead.y == self.rest_position(i, bead_height))
    }

    /// Move every bead to its rest position
    pub fn apply_canonical_layout(&mut self, bead_height: f32) {
        for i in 0..self.beads.len() {
            self.beads[i].y = self.rest_position(i, bead_height);
        }
    }

    /// Push beads after `i` away so none overlaps its lower-index neighbor
    pub fn cascade_up(&mut self, i: usize, bead_height: f32) {
        for j in i + 1..self.beads.len() {
            let floor = self.beads[j - 1].y + bead_height;
            self.beads[j].y = self.beads[j].y.max(floor);
        }
    }

    /// Push beads before `i` away so none overlaps its higher-index neighbor
    pub fn cascade_down(&mut self, i: usize, bead_height: f32) {
        for j in (0..i).rev() {
            let ceiling = self.beads[j + 1].y - bead_height;
            self.beads[j].y = self.beads[j].y.min(ceiling);
        }
    }
}

/// One column of the abacus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rod {
    /// 0-based position from the right
    pub place: usize,
    pub sections: Vec<Arc<RodSection>>,
}

impl Rod {
    /// Copy of this rod with every section at its canonical rest layout
    ///
    /// Sections already at rest are shared, not copied.
    pub fn reset(&self, bead_height: f32) -> Rod {
        let sections = self
            .sections
            .iter()
            .map(|section| {
                if section.is_at_rest(bead_height) {
                    Arc::clone(section)
                } else {
                    let mut section = RodSection::clone(section);
                    section.apply_canonical_layout(bead_height);
                    Arc::new(section)
                }
            })
            .collect();
        Rod {
            place: self.place,
            sections,
        }
    }

    pub fn bead_count(&self) -> usize {
        self.sections.iter().map(|s| s.beads.len()).sum()
    }
}

/// Rewrite every section of a rod to its canonical layout
pub fn reset_rod(rod: &Rod, vertical: &VerticalLayout) -> Rod {
    rod.reset(vertical.bead_height)
}

/// A broken stacking or bounds invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("rod {place} section {section}: bead {bead} at {y} outside [{min}, {max}]")]
    OutOfBand {
        place: usize,
        section: usize,
        bead: usize,
        y: f32,
        min: f32,
        max: f32,
    },
    #[error("rod {place} section {section}: bead {bead} only {gap} above the next one")]
    Overlap {
        place: usize,
        section: usize,
        bead: usize,
        gap: f32,
    },
}

/// Check ordering and travel bounds of every bead
pub fn check_rods(rods: &[Arc<Rod>], bead_height: f32) -> Result<(), InvariantViolation> {
    for rod in rods {
        for (section_index, section) in rod.sections.iter().enumerate() {
            for (i, bead) in section.beads.iter().enumerate() {
                let (min, max) = section.travel_band(i, bead_height);
                if bead.y < min - INVARIANT_EPSILON || bead.y > max + INVARIANT_EPSILON {
                    return Err(InvariantViolation::OutOfBand {
                        place: rod.place,
                        section: section_index,
                        bead: i,
                        y: bead.y,
                        min,
                        max,
                    });
                }
            }
            for (i, pair) in section.beads.windows(2).enumerate() {
                let gap = pair[1].y - pair[0].y;
                if gap < bead_height - INVARIANT_EPSILON {
                    return Err(InvariantViolation::Overlap {
                        place: rod.place,
                        section: section_index,
                        bead: i,
                        gap,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Build `count` rods at rest for the given vertical layout
///
/// Upper deck (factor 5) rests against the top of the frame, lower deck
/// (factor 1) against the bottom. The lower bead nearest the beam is the
/// header bead.
pub fn make_rods(count: usize, vertical: &VerticalLayout) -> Rods {
    let bead_height = vertical.bead_height;
    let beam_height = vertical.beam_height;
    let upper_deck_height = vertical.upper_deck_height();
    let lower_deck_height = vertical.lower_deck_height();
    let h = bead_height / 2.0;

    let upper_top = h;
    let upper_bottom = upper_deck_height - h;
    let lower_top = upper_deck_height + beam_height + h;
    let lower_bottom = upper_deck_height + beam_height + lower_deck_height - h;

    (0..count)
        .map(|place| {
            let upper_beads = (0..vertical.upper_deck_beads)
                .map(|j| Bead {
                    y: (upper_top + j as f32 * bead_height).round(),
                    header: false,
                })
                .collect();
            let n = vertical.lower_deck_beads;
            let lower_beads = (0..n)
                .map(|j| Bead {
                    y: (lower_bottom - (n - j - 1) as f32 * bead_height).round(),
                    header: j == 0,
                })
                .collect();
            Arc::new(Rod {
                place,
                sections: vec![
                    Arc::new(RodSection {
                        y1: upper_top.round(),
                        y2: upper_bottom.round(),
                        direction: Direction::Bottom,
                        factor: 5,
                        beads: upper_beads,
                    }),
                    Arc::new(RodSection {
                        y1: lower_top.round(),
                        y2: lower_bottom.round(),
                        direction: Direction::Top,
                        factor: 1,
                        beads: lower_beads,
                    }),
                ],
            })
        })
        .collect()
}
