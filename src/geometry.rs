/// 2D primitives shared by every entity.
///
/// A `Vector` is a displacement, a `Position` is a point.  Collision between
/// two points is proximity-based: see [`collides`].

use serde::{Deserialize, Serialize};

// ── Vector ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// The opposite displacement.
    pub fn negate(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.negate()
    }
}

/// Unit displacements in screen space (y grows downward).
pub const UP: Vector = Vector::new(0.0, -1.0);
pub const DOWN: Vector = Vector::new(0.0, 1.0);
pub const LEFT: Vector = Vector::new(-1.0, 0.0);
pub const RIGHT: Vector = Vector::new(1.0, 0.0);

// ── Position ─────────────────────────────────────────────────────────────────

/// A point on the play field.
///
/// `==` is exact coordinate equality.  Hit detection never uses it; it goes
/// through [`collides`], which is not transitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate in place: `x += dx, y += dy`.
    pub fn apply(&mut self, v: Vector) {
        self.x += v.dx;
        self.y += v.dy;
    }

    /// A translated copy, leaving `self` untouched.
    pub fn offset(self, v: Vector) -> Self {
        Self::new(self.x + v.dx, self.y + v.dy)
    }
}

/// Proximity test used for all hit detection.
///
/// True iff both axis distances are strictly below `padding`.  Symmetric and
/// reflexive, but not transitive: with padding 10, (0,0)~(9,0) and
/// (9,0)~(18,0) while (0,0) and (18,0) do not collide.
pub fn collides(a: Position, b: Position, padding: f32) -> bool {
    (a.x - b.x).abs() < padding && (a.y - b.y).abs() < padding
}

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment, matching the usual pixel-rect convention:
    /// the right and bottom edges are outside.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}
