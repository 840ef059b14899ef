//! Soroban Sim - bead-position simulation for a virtual abacus
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bead collisions, rod state, digits)
//! - `layout`: Size presets and derived frame geometry
//! - `settings`: User preferences with field-by-field JSON validation
//! - `input`: Mouse/touch samples to move batches
//! - `script`: Scripted and random replays of move batches

pub mod input;
pub mod layout;
pub mod script;
pub mod settings;
pub mod sim;

pub use layout::{HorizontalLayout, LayoutSize, VerticalLayout};
pub use settings::Settings;
pub use sim::{Abacus, Move, Point};

/// Simulation configuration constants
pub mod consts {
    /// Vertical slack around the beam band for the reset gesture (pixels)
    pub const BEAM_SLIDE_TOLERANCE: f32 = 5.0;
    /// Horizontal travel needed along the beam, as a ratio of bead width
    pub const BEAM_SLIDE_THRESHOLD: f32 = 0.75;

    /// Contact footprint of a fingertip (mouse contacts use 0)
    pub const TOUCH_RADIUS: f32 = 5.0;

    /// Rods allocated regardless of how many are visible
    pub const MAX_RODS: usize = 37;
    /// Unit rod markers repeat every third rod; the first one is chosen in 1..=4
    pub const MAX_FIRST_UNIT_ROD: usize = 4;

    /// Target travel per collision sub-step (pixels)
    pub const SUBSTEP_LENGTH: f32 = 5.0;
    /// Cap on sub-steps per move
    pub const MAX_SUBSTEPS: usize = 20;

    /// Per-bead stacking slack accepted by the digit decoder (pixels)
    pub const DIGIT_SLACK_PER_BEAD: f32 = 1.5;
    /// Fixed slack accepted by the digit decoder (pixels)
    pub const DIGIT_SLACK_BASE: f32 = 3.0;
}
