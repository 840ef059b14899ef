//! Deterministic simulation module
//!
//! All bead logic lives here. This module must be pure and deterministic:
//! - One tick per ordered move batch, processed to completion
//! - Moves, rods, sections and beads are always visited in order
//! - No rendering, platform or clock dependencies

pub mod abacus;
pub mod beam;
pub mod digits;
pub mod geom;
pub mod resolver;
pub mod rod;

/// A 2-D coordinate in the abacus's local pixel space
pub type Point = glam::Vec2;

pub use abacus::Abacus;
pub use beam::{BeamSlideTracker, Swipe, reset_swiped_rods};
pub use digits::{BeadPlacement, classify_bead, rod_digit, section_value};
pub use geom::{Circle, Intersection, bead_octagon, circle_vs_convex_polygon, circle_vs_directed_line, distance, lerp};
pub use resolver::{Move, move_beads, near_rod};
pub use rod::{Bead, Direction, InvariantViolation, Rod, RodSection, Rods, check_rods, make_rods, reset_rod};
