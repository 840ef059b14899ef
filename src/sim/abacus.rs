//! Simulation context
//!
//! Owns the layout, the rod array and the beam-slide tracker. One call to
//! [`Abacus::tick`] processes one ordered batch of moves to completion.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::beam::{BeamSlideTracker, reset_swiped_rods};
use super::digits;
use super::resolver::{Move, move_beads};
use super::rod::{Rods, make_rods};
use crate::consts::MAX_RODS;
use crate::layout::{HorizontalLayout, LayoutSize, VerticalLayout};

/// Complete abacus state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abacus {
    horizontal: HorizontalLayout,
    vertical: VerticalLayout,
    /// Rods shown, counted from the right
    visible: usize,
    rods: Rods,
    slides: BeamSlideTracker,
    /// Simulation tick counter
    ticks: u64,
}

impl Abacus {
    /// Create an abacus at rest using a size preset
    pub fn new(size: LayoutSize, visible: usize) -> Self {
        Self::with_layouts(size.horizontal(), size.vertical(), visible)
    }

    /// Create an abacus at rest with explicit layouts
    pub fn with_layouts(horizontal: HorizontalLayout, vertical: VerticalLayout, visible: usize) -> Self {
        let visible = visible.min(MAX_RODS);
        log::info!(
            "Building {} rods ({} visible), bead {}x{}",
            MAX_RODS,
            visible,
            horizontal.bead_width,
            vertical.bead_height
        );
        Self {
            horizontal,
            vertical,
            visible,
            rods: make_rods(MAX_RODS, &vertical),
            slides: BeamSlideTracker::new(),
            ticks: 0,
        }
    }

    pub fn horizontal(&self) -> &HorizontalLayout {
        &self.horizontal
    }

    pub fn vertical(&self) -> &VerticalLayout {
        &self.vertical
    }

    pub fn visible_rods(&self) -> usize {
        self.visible
    }

    /// All rods, including hidden ones
    pub fn rods(&self) -> &Rods {
        &self.rods
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Horizontal center of a visible rod
    pub fn rod_center(&self, place: usize) -> f32 {
        self.horizontal.rod_center(place, self.visible)
    }

    /// Process one batch of moves
    ///
    /// Beam swipes are applied first, then the same batch moves beads on the
    /// (possibly reset) rods. Returns the places of rods that changed.
    pub fn tick(&mut self, moves: &[Move]) -> Vec<usize> {
        self.ticks += 1;
        let before = self.rods.clone();

        let swipes = self.slides.update(moves, &self.horizontal, &self.vertical);
        if let Some(reset) = reset_swiped_rods(&self.rods, self.visible, &swipes, &self.horizontal, &self.vertical) {
            self.rods = reset;
        }
        self.rods = move_beads(&self.rods, self.visible, moves, &self.horizontal, &self.vertical);

        let changed: Vec<usize> = self
            .rods
            .iter()
            .zip(&before)
            .filter(|(now, then)| !Arc::ptr_eq(now, then))
            .map(|(rod, _)| rod.place)
            .collect();
        if !changed.is_empty() {
            log::debug!("tick {}: {} moves, rods changed {:?}", self.ticks, moves.len(), changed);
        }
        changed
    }

    /// Switch to another size preset
    ///
    /// Rods are rebuilt only if the vertical structure changes.
    pub fn set_size(&mut self, size: LayoutSize) {
        self.set_layouts(size.horizontal(), size.vertical());
    }

    pub fn set_layouts(&mut self, horizontal: HorizontalLayout, vertical: VerticalLayout) {
        let rebuild = !self.vertical.same_structure(&vertical);
        self.horizontal = horizontal;
        self.vertical = vertical;
        if rebuild {
            self.rebuild();
        }
    }

    /// Change how many rods are shown; rods are rebuilt on change
    pub fn set_visible_rods(&mut self, visible: usize) {
        let visible = visible.min(MAX_RODS);
        if visible != self.visible {
            self.visible = visible;
            self.rebuild();
        }
    }

    /// Return every rod to rest
    pub fn reset_all(&mut self) {
        let bead_height = self.vertical.bead_height;
        for rod in self.rods.iter_mut() {
            if rod.sections.iter().any(|s| !s.is_at_rest(bead_height)) {
                *rod = Arc::new(rod.reset(bead_height));
            }
        }
    }

    /// Digit per visible rod, keyed by place
    pub fn digits(&self) -> BTreeMap<usize, Option<u32>> {
        digits::digits(&self.rods, self.visible, &self.vertical)
    }

    /// Number shown across the visible rods
    pub fn value(&self) -> Option<u128> {
        digits::value(&self.digits())
    }

    fn rebuild(&mut self) {
        log::info!("Rebuilding {} rods ({} visible)", MAX_RODS, self.visible);
        self.rods = make_rods(MAX_RODS, &self.vertical);
        self.slides.clear();
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self::new(LayoutSize::default(), 13)
    }
}
