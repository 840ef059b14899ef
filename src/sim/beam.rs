//! Beam-reset gesture
//!
//! Sliding a contact along the beam wipes every rod it passes back to rest.
//! Travel is measured from where the contact first entered the beam band and
//! that start is never moved while the contact stays in the band, so a contact
//! that overshoots and comes back may not retrigger a rod it already crossed.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::resolver::Move;
use super::rod::{Rod, Rods};
use crate::consts::{BEAM_SLIDE_THRESHOLD, BEAM_SLIDE_TOLERANCE};
use crate::layout::{HorizontalLayout, VerticalLayout};

/// Horizontal extent covered by a beam slide during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub min_x: f32,
    pub max_x: f32,
}

impl Swipe {
    /// Closed: `[min_x, max_x]`
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

/// Per-contact beam slide starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamSlideTracker {
    starts: HashMap<u32, Vec2>,
}

impl BeamSlideTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded slide start for a contact, if it is on the beam
    pub fn start(&self, id: u32) -> Option<Vec2> {
        self.starts.get(&id).copied()
    }

    /// Number of contacts currently sliding on the beam
    pub fn active(&self) -> usize {
        self.starts.len()
    }

    pub fn clear(&mut self) {
        self.starts.clear();
    }

    /// Inspect a batch of moves and return the swipes it completes
    pub fn update(
        &mut self,
        moves: &[Move],
        horizontal: &HorizontalLayout,
        vertical: &VerticalLayout,
    ) -> Vec<Swipe> {
        let top = vertical.beam_top() - BEAM_SLIDE_TOLERANCE;
        let bottom = vertical.beam_bottom() + BEAM_SLIDE_TOLERANCE;
        let on_beam = |p: Vec2| p.y > top && p.y < bottom;
        let threshold = horizontal.bead_width * BEAM_SLIDE_THRESHOLD;

        let mut swipes = Vec::new();
        for mv in moves {
            if !(on_beam(mv.from) && on_beam(mv.to)) {
                self.starts.remove(&mv.id);
                continue;
            }
            match self.start(mv.id) {
                Some(start) => {
                    if (start.x - mv.to.x).abs() > threshold {
                        swipes.push(Swipe {
                            min_x: mv.from.x.min(mv.to.x),
                            max_x: mv.from.x.max(mv.to.x),
                        });
                    }
                }
                None => {
                    self.starts.insert(mv.id, mv.from);
                }
            }
        }
        swipes
    }
}

/// Reset every visible rod whose center lies in one of the swipes
///
/// Returns `None` when no rod was hit, so callers can keep their array.
pub fn reset_swiped_rods(
    rods: &[Arc<Rod>],
    visible: usize,
    swipes: &[Swipe],
    horizontal: &HorizontalLayout,
    vertical: &VerticalLayout,
) -> Option<Rods> {
    if swipes.is_empty() {
        return None;
    }
    let mut any_reset = false;
    let result: Rods = rods
        .iter()
        .map(|rod| {
            if rod.place >= visible {
                return Arc::clone(rod);
            }
            let x = horizontal.rod_center(rod.place, visible);
            if swipes.iter().any(|swipe| swipe.contains(x)) {
                any_reset = true;
                log::debug!("beam swipe resets rod {}", rod.place);
                Arc::new(rod.reset(vertical.bead_height))
            } else {
                Arc::clone(rod)
            }
        })
        .collect();
    any_reset.then_some(result)
}
