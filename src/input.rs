//! Pointer samples to move batches
//!
//! Mouse and touch events arrive as absolute positions; the simulation wants
//! per-contact displacements with stable ids.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::consts::TOUCH_RADIUS;
use crate::sim::Move;

/// Turns mouse button/position samples into moves
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    /// Contact id of the current (or last) drag
    id: u32,
    /// Last sample while the button is held
    last: Option<Vec2>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }

    /// Button pressed: starts a new contact and registers it in place
    pub fn press(&mut self, p: Vec2) -> Vec<Move> {
        self.last = None;
        self.motion(p)
    }

    /// Pointer moved; yields nothing while the button is up
    pub fn motion(&mut self, p: Vec2) -> Vec<Move> {
        let from = match self.last {
            Some(last) => last,
            None => {
                self.id = self.id.wrapping_add(1);
                p
            }
        };
        self.last = Some(p);
        vec![Move::pointer(self.id, from, p)]
    }

    /// Pointer moved with the button state as reported by the platform
    pub fn sample(&mut self, p: Vec2, pressed: bool) -> Vec<Move> {
        if pressed {
            self.motion(p)
        } else {
            self.last = None;
            Vec::new()
        }
    }

    /// Button released; the empty batch lets the simulation settle
    pub fn release(&mut self) -> Vec<Move> {
        self.last = None;
        Vec::new()
    }
}

/// Turns per-finger touch samples into moves
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    touches: BTreeMap<u32, Vec2>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers down
    pub fn active(&self) -> usize {
        self.touches.len()
    }

    /// Touch started or moved; a new finger yields a zero-length move
    pub fn touch(&mut self, id: u32, p: Vec2) -> Move {
        let from = self.touches.insert(id, p).unwrap_or(p);
        Move::new(id, from, p, TOUCH_RADIUS)
    }

    /// Batch of changed touches from one platform event
    pub fn touches(&mut self, changed: &[(u32, Vec2)]) -> Vec<Move> {
        changed.iter().map(|&(id, p)| self.touch(id, p)).collect()
    }

    /// Finger lifted or cancelled
    pub fn lift(&mut self, ids: &[u32]) -> Vec<Move> {
        for id in ids {
            self.touches.remove(id);
        }
        Vec::new()
    }
}
