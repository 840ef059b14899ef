//! Move resolver: pointer moves against beads
//!
//! Each move is checked against every visible rod with a cheap horizontal
//! bound, then swept in short sub-steps so fast drags cannot tunnel through a
//! bead. A bead touched by the contact follows it along the rod, clamped to
//! its travel band, and shoves its neighbors to keep the stack ordered.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, Intersection, bead_octagon, circle_vs_convex_polygon, distance, lerp};
use super::rod::{Rod, Rods};
use crate::consts::{MAX_SUBSTEPS, SUBSTEP_LENGTH, TOUCH_RADIUS};
use crate::layout::{HorizontalLayout, VerticalLayout};

/// One contact's displacement between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Stable for the duration of a drag
    pub id: u32,
    pub from: Vec2,
    pub to: Vec2,
    /// Contact footprint (0 for a mouse)
    #[serde(default)]
    pub radius: f32,
}

impl Move {
    pub fn new(id: u32, from: Vec2, to: Vec2, radius: f32) -> Self {
        Self { id, from, to, radius }
    }

    /// Point contact, as produced by a mouse
    pub fn pointer(id: u32, from: Vec2, to: Vec2) -> Self {
        Self::new(id, from, to, 0.0)
    }

    /// Fingertip contact
    pub fn touch(id: u32, from: Vec2, to: Vec2) -> Self {
        Self::new(id, from, to, TOUCH_RADIUS)
    }

    /// Number of sweep sub-steps; a zero-length move still gets one
    pub fn substeps(&self) -> usize {
        let steps = (distance(self.from, self.to) / SUBSTEP_LENGTH).ceil();
        if steps.is_nan() || steps < 1.0 {
            1
        } else {
            (steps as usize).min(MAX_SUBSTEPS)
        }
    }

    /// Sub-step endpoints, in order
    pub fn sweep(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let steps = self.substeps();
        (0..steps).map(move |step| {
            let aa = lerp(self.from, self.to, step as f32 / steps as f32);
            let bb = lerp(self.from, self.to, (step + 1) as f32 / steps as f32);
            (aa, bb)
        })
    }
}

/// True when the segment a→b might reach a rod centered at `cx`
///
/// The margin is half a bead plus the contact radius.
#[inline]
pub fn near_rod(a: Vec2, b: Vec2, cx: f32, half_bead_width: f32, radius: f32) -> bool {
    let far = half_bead_width + radius;
    a.x.max(b.x) >= cx - far && a.x.min(b.x) <= cx + far
}

/// Apply an ordered batch of moves to the visible rods
///
/// Returns a new rod array. Rods and sections no move touched are shared
/// with `rods`; the rest are fresh copies.
pub fn move_beads(
    rods: &[Arc<Rod>],
    visible: usize,
    moves: &[Move],
    horizontal: &HorizontalLayout,
    vertical: &VerticalLayout,
) -> Rods {
    let mut result: Rods = rods.to_vec();
    if moves.is_empty() {
        return result;
    }

    let bead_height = vertical.bead_height;
    let half_width = horizontal.bead_width / 2.0;
    let shape = bead_octagon(
        horizontal.bead_width,
        vertical.bead_height,
        horizontal.bead_hole,
        vertical.bead_extra,
    );

    for (rod_index, rod) in rods.iter().enumerate() {
        if rod.place >= visible {
            continue;
        }
        let cx = horizontal.rod_center(rod.place, visible);
        for mv in moves {
            if !near_rod(mv.from, mv.to, cx, half_width, mv.radius) {
                continue;
            }
            for (aa, bb) in mv.sweep() {
                if !near_rod(aa, bb, cx, half_width, mv.radius) {
                    continue;
                }
                let sections = result[rod_index].sections.len();
                for section_index in 0..sections {
                    // Always read the latest state: earlier sub-steps may have moved beads
                    let section = &result[rod_index].sections[section_index];
                    let mut caught = None;
                    for (i, bead) in section.beads.iter().enumerate() {
                        let cy = bead.y;
                        if aa.y < cy - bead_height || aa.y > cy + bead_height {
                            continue;
                        }
                        let contact = Circle::new(Vec2::new(aa.x - cx, aa.y - cy), mv.radius);
                        if circle_vs_convex_polygon(contact, &shape) == Intersection::Outside {
                            continue;
                        }
                        let (min_y, max_y) = section.travel_band(i, bead_height);
                        let y = min_y.max(max_y.min(bb.y - (aa.y - cy)));
                        if y != cy {
                            caught = Some((i, y));
                            break;
                        }
                    }

                    let Some((i, y)) = caught else {
                        continue;
                    };
                    let rod = Arc::make_mut(&mut result[rod_index]);
                    let section = Arc::make_mut(&mut rod.sections[section_index]);
                    let previous = section.beads[i].y;
                    section.beads[i].y = y;
                    if y < previous {
                        section.cascade_down(i, bead_height);
                    } else {
                        section.cascade_up(i, bead_height);
                    }
                    log::trace!(
                        "contact {} moved rod {} section {} bead {}: {} -> {}",
                        mv.id,
                        rod.place,
                        section_index,
                        i,
                        previous,
                        y
                    );
                }
            }
        }
    }
    result
}
