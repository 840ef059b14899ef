//! End-to-end bead scenarios on a full abacus

use std::sync::Arc;

use glam::Vec2;
use soroban_sim::sim::{
    Abacus, BeadPlacement, Direction, Move, Rod, check_rods, classify_bead, make_rods, move_beads, rod_digit,
};
use soroban_sim::{LayoutSize, VerticalLayout};

fn drag(abacus: &mut Abacus, id: u32, place: usize, from_y: f32, to_y: f32) -> Vec<usize> {
    let cx = abacus.rod_center(place);
    abacus.tick(&[Move::pointer(id, Vec2::new(cx, from_y), Vec2::new(cx, to_y))])
}

#[test]
fn digit_round_trip() {
    let mut abacus = Abacus::new(LayoutSize::Medium, 1);
    assert_eq!(abacus.digits().get(&0), Some(&Some(0)));

    // Lift the whole lower stack against the beam
    drag(&mut abacus, 1, 0, 288.0, 200.0);
    assert_eq!(abacus.digits().get(&0), Some(&Some(4)));

    // Bring the upper bead down to the beam
    drag(&mut abacus, 2, 0, 24.0, 60.0);
    assert_eq!(abacus.digits().get(&0), Some(&Some(9)));
    assert_eq!(abacus.value(), Some(9));

    abacus.reset_all();
    assert_eq!(abacus.value(), Some(0));
}

#[test]
fn beam_swipe_resets_rods_under_it() {
    let mut abacus = Abacus::new(LayoutSize::Medium, 5);
    for place in 0..5 {
        drag(&mut abacus, 10 + place as u32, place, 144.0, 110.0);
    }
    assert_eq!(abacus.value(), Some(11111));

    let h = *abacus.horizontal();
    let y = abacus.vertical().beam_top() + 2.0;
    let start = Vec2::new(100.0, y);
    let end = Vec2::new(100.0 + h.bead_width * 0.8, y);
    // Only place 3 (center 111) lies in [100, 157.6]
    assert_eq!(abacus.rod_center(3), 111.0);

    assert!(abacus.tick(&[Move::pointer(1, start, start)]).is_empty());
    let changed = abacus.tick(&[Move::pointer(1, start, end)]);
    assert_eq!(changed, vec![3]);
    assert_eq!(abacus.value(), Some(10111));
    assert!(abacus.tick(&[]).is_empty());
}

#[test]
fn beam_swipe_measures_from_first_contact() {
    let mut abacus = Abacus::new(LayoutSize::Medium, 5);
    drag(&mut abacus, 1, 3, 144.0, 110.0);
    assert_eq!(abacus.value(), Some(1000));

    let y = abacus.vertical().beam_top() + 2.0;
    let p = |x: f32| Vec2::new(x, y);
    // Slide left, then back right across rod 3 (center 111)
    abacus.tick(&[Move::pointer(5, p(100.0), p(100.0))]);
    abacus.tick(&[Move::pointer(5, p(100.0), p(60.0))]);
    // Travel from the start never exceeds the threshold, so nothing resets
    abacus.tick(&[Move::pointer(5, p(60.0), p(130.0))]);
    assert_eq!(abacus.value(), Some(1000));
}

#[test]
fn single_drag_through_bottom_rest_section() {
    // Upper deck with four beads resting at the top of the frame
    let vertical = VerticalLayout {
        upper_deck_beads: 4,
        ..LayoutSize::Medium.vertical()
    };
    let horizontal = LayoutSize::Medium.horizontal();
    let rods = make_rods(1, &vertical);
    let bead_height = vertical.bead_height;
    let section = &rods[0].sections[0];
    assert_eq!(section.direction, Direction::Bottom);
    let y1 = section.y1;
    let count_bottom = |rods: &[Arc<Rod>]| {
        let s = &rods[0].sections[0];
        (0..s.beads.len())
            .filter(|&i| classify_bead(s, i, bead_height) == BeadPlacement::Bottom)
            .count()
    };
    assert_eq!(count_bottom(&rods), 4);
    let before = rod_digit(&rods[0], bead_height);

    let cx = horizontal.rod_center(0, 1);
    let mv = Move::pointer(1, Vec2::new(cx, y1), Vec2::new(cx, y1 + 3.0 * bead_height));
    let after = move_beads(&rods, 1, &[mv], &horizontal, &vertical);

    assert!(count_bottom(&after) < 4);
    assert_ne!(rod_digit(&after[0], bead_height), before);
    assert_eq!(check_rods(&after, bead_height), Ok(()));
}

#[test]
fn multi_touch_batch_moves_two_rods() {
    let mut abacus = Abacus::new(LayoutSize::Large, 4);
    let a = abacus.rod_center(0);
    let b = abacus.rod_center(2);
    let lower = abacus.rods()[0].sections[1].clone();
    let top_bead = lower.beads[0].y;
    let changed = abacus.tick(&[
        Move::touch(1, Vec2::new(a, top_bead), Vec2::new(a, top_bead - 40.0)),
        Move::touch(2, Vec2::new(b, top_bead), Vec2::new(b, top_bead - 40.0)),
    ]);
    assert_eq!(changed, vec![0, 2]);
    assert_eq!(abacus.value(), Some(101));
}

#[test]
fn stationary_press_changes_nothing() {
    let mut abacus = Abacus::new(LayoutSize::Small, 3);
    let before = abacus.rods().clone();
    let cx = abacus.rod_center(1);
    let y = before[1].sections[1].beads[2].y;
    assert!(abacus.tick(&[Move::touch(1, Vec2::new(cx, y), Vec2::new(cx, y))]).is_empty());
    assert_eq!(abacus.rods(), &before);
}
