use chicken_invaders::geometry::*;

use proptest::prelude::*;

// ── Vector / Position ─────────────────────────────────────────────────────────

#[test]
fn negate_flips_both_axes() {
    let v = Vector::new(3.0, -2.5);
    assert_eq!(v.negate(), Vector::new(-3.0, 2.5));
    assert_eq!(-v, v.negate());
}

#[test]
fn apply_translates_in_place() {
    let mut p = Position::new(10.0, 20.0);
    p.apply(Vector::new(5.0, -2.5));
    assert_eq!(p, Position::new(15.0, 17.5));
}

#[test]
fn offset_leaves_original_alone() {
    let p = Position::new(1.0, 1.0);
    let q = p.offset(RIGHT.scale(4.0));
    assert_eq!(p, Position::new(1.0, 1.0));
    assert_eq!(q, Position::new(5.0, 1.0));
}

// ── collides ──────────────────────────────────────────────────────────────────

#[test]
fn collides_within_padding_on_both_axes() {
    let a = Position::new(0.0, 0.0);
    assert!(collides(a, Position::new(9.0, -9.0), 10.0));
    assert!(!collides(a, Position::new(10.0, 0.0), 10.0)); // strict bound
    assert!(!collides(a, Position::new(0.0, 12.0), 10.0));
}

#[test]
fn collides_is_not_transitive() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(9.0, 0.0);
    let c = Position::new(18.0, 0.0);
    assert!(collides(a, b, 10.0));
    assert!(collides(b, c, 10.0));
    assert!(!collides(a, c, 10.0));
}

proptest! {
    #[test]
    fn collides_is_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0,
        padding in 0.1f32..50.0,
    ) {
        let a = Position::new(ax, ay);
        let b = Position::new(bx, by);
        prop_assert_eq!(collides(a, b, padding), collides(b, a, padding));
    }

    #[test]
    fn collides_is_reflexive(x in -500.0f32..500.0, y in -500.0f32..500.0, padding in 0.1f32..50.0) {
        let p = Position::new(x, y);
        prop_assert!(collides(p, p, padding));
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(150.0, 175.0, 100.0, 50.0);
    assert!(r.contains(Position::new(150.0, 175.0)));
    assert!(r.contains(Position::new(200.0, 200.0)));
    assert!(!r.contains(Position::new(250.0, 200.0)));
    assert!(!r.contains(Position::new(200.0, 225.0)));
    assert_eq!(r.center(), Position::new(200.0, 200.0));
}
