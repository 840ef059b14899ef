//! Scripted replays
//!
//! A script is a layout plus an ordered list of move batches, one per tick.
//! Scripts can be loaded from JSON or generated from a seed for soak runs.

use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TOUCH_RADIUS;
use crate::layout::LayoutSize;
use crate::sim::{Abacus, InvariantViolation, Move, check_rods};

/// Errors from loading or running a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("after tick {tick}: {violation}")]
    Invariant {
        tick: usize,
        #[source]
        violation: InvariantViolation,
    },
}

fn default_rods() -> usize {
    13
}

/// Layout and move batches to replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub size: LayoutSize,
    /// Visible rods
    #[serde(default = "default_rods")]
    pub rods: usize,
    pub ticks: Vec<Vec<Move>>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fresh abacus for this script's layout
    pub fn abacus(&self) -> Abacus {
        Abacus::new(self.size, self.rods)
    }

    /// Replay every tick
    pub fn run(&self) -> Abacus {
        let mut abacus = self.abacus();
        for batch in &self.ticks {
            abacus.tick(batch);
        }
        abacus
    }

    /// Replay every tick, checking bead ordering and bounds after each one
    pub fn run_checked(&self) -> Result<Abacus, ScriptError> {
        let mut abacus = self.abacus();
        for (tick, batch) in self.ticks.iter().enumerate() {
            abacus.tick(batch);
            check_rods(abacus.rods(), abacus.vertical().bead_height)
                .map_err(|violation| ScriptError::Invariant { tick, violation })?;
        }
        Ok(abacus)
    }
}

/// Contacts held at once by a random script
const MAX_CONTACTS: usize = 2;

/// Generate a deterministic script of random drags, presses and beam slides
pub fn random_script(seed: u64, ticks: usize, size: LayoutSize, rods: usize) -> Script {
    let mut rng = Pcg32::seed_from_u64(seed);
    let horizontal = size.horizontal();
    let vertical = size.vertical();
    let bounds = Vec2::new(horizontal.frame_width(rods), vertical.frame_height());

    // (id, position, radius)
    let mut contacts: Vec<(u32, Vec2, f32)> = Vec::new();
    let mut next_id = 1;
    let mut batches = Vec::with_capacity(ticks);

    for _ in 0..ticks {
        let roll: f32 = rng.random();
        let mut batch = Vec::new();
        if contacts.is_empty() || (roll < 0.1 && contacts.len() < MAX_CONTACTS) {
            let place = rng.random_range(0..rods.max(1));
            let x = horizontal.rod_center(place, rods) + rng.random_range(-10.0..10.0);
            let y = rng.random_range(0.0..bounds.y);
            let p = Vec2::new(x, y).clamp(Vec2::ZERO, bounds);
            let radius = if rng.random_bool(0.5) { TOUCH_RADIUS } else { 0.0 };
            contacts.push((next_id, p, radius));
            batch.push(Move::new(next_id, p, p, radius));
            next_id += 1;
        } else if roll < 0.2 {
            let index = rng.random_range(0..contacts.len());
            contacts.remove(index);
        } else {
            for (id, pos, radius) in contacts.iter_mut() {
                let delta = if rng.random_bool(0.1) {
                    Vec2::new(rng.random_range(-120.0..120.0), 0.0)
                } else {
                    Vec2::new(rng.random_range(-6.0..6.0), rng.random_range(-60.0..60.0))
                };
                let to = (*pos + delta).clamp(Vec2::ZERO, bounds);
                batch.push(Move::new(*id, *pos, to, *radius));
                *pos = to;
            }
        }
        batches.push(batch);
    }

    Script {
        size,
        rods,
        ticks: batches,
    }
}
