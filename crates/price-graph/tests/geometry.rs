// File: crates/price-graph/tests/geometry.rs
// Purpose: Label placement: clamping into the plot, flipping on overlap, dropping.

use price_graph::geometry::{place_labels, RectF};

fn plot() -> RectF {
    RectF::from_ltrb(0.0, 0.0, 200.0, 100.0)
}

#[test]
fn free_label_keeps_its_preferred_box() {
    let above = RectF::from_ltwh(50.0, 20.0, 30.0, 10.0);
    let below = RectF::from_ltwh(50.0, 50.0, 30.0, 10.0);
    assert_eq!(place_labels(&plot(), &[(above, below)]), vec![Some(above)]);
}

#[test]
fn overlapping_label_flips_to_the_other_side() {
    let first = RectF::from_ltwh(50.0, 20.0, 30.0, 10.0);
    let second_above = RectF::from_ltwh(60.0, 22.0, 30.0, 10.0);
    let second_below = RectF::from_ltwh(60.0, 50.0, 30.0, 10.0);
    let got = place_labels(&plot(), &[(first, first), (second_above, second_below)]);
    assert_eq!(got, vec![Some(first), Some(second_below)]);
}

#[test]
fn lower_priority_label_is_dropped_when_both_sides_collide() {
    let current = RectF::from_ltwh(40.0, 20.0, 60.0, 50.0);
    let min_above = RectF::from_ltwh(50.0, 25.0, 20.0, 10.0);
    let min_below = RectF::from_ltwh(50.0, 55.0, 20.0, 10.0);
    let max = RectF::from_ltwh(150.0, 10.0, 20.0, 10.0);
    let got = place_labels(&plot(), &[(current, current), (min_above, min_below), (max, max)]);
    assert_eq!(got, vec![Some(current), None, Some(max)]);
}

#[test]
fn labels_are_clamped_inside_the_plot() {
    let off_left = RectF::from_ltwh(-12.0, -5.0, 30.0, 10.0);
    let got = place_labels(&plot(), &[(off_left, off_left)]);
    assert_eq!(got, vec![Some(RectF::from_ltwh(0.0, 0.0, 30.0, 10.0))]);

    let off_bottom_right = RectF::from_ltwh(190.0, 95.0, 30.0, 10.0);
    assert_eq!(off_bottom_right.clamp_into(&plot()), RectF::from_ltwh(170.0, 90.0, 30.0, 10.0));
}
