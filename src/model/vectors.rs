//! Geometry on the 8×8 grid.
//!
//! A [`Vector`] is a `(rows, columns)` displacement. Pieces other than
//! the pawn are described entirely by which of the tables below they
//! move along, and whether they repeat the step.

/// Displacement in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector(pub i8, pub i8);

impl Vector {
    /// Reduce to the smallest step with the same direction,
    /// e.g. `(4, -4)` to `(1, -1)` and `(2, 1)` to itself.
    pub fn step(self) -> Vector {
        let d = gcd(self.0.unsigned_abs(), self.1.unsigned_abs()).max(1) as i8;
        Vector(self.0 / d, self.1 / d)
    }
}

fn gcd(a: u8, b: u8) -> u8 {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub const STRAIGHT: [Vector; 4] = [Vector(0, 1), Vector(0, -1), Vector(1, 0), Vector(-1, 0)];

pub const DIAGONAL: [Vector; 4] = [Vector(1, 1), Vector(1, -1), Vector(-1, 1), Vector(-1, -1)];

pub const ALL: [Vector; 8] = [
    Vector(0, 1),
    Vector(0, -1),
    Vector(1, 0),
    Vector(-1, 0),
    Vector(1, 1),
    Vector(1, -1),
    Vector(-1, 1),
    Vector(-1, -1),
];

pub const KNIGHT: [Vector; 8] = [
    Vector(1, 2),
    Vector(2, 1),
    Vector(-1, 2),
    Vector(2, -1),
    Vector(1, -2),
    Vector(-2, 1),
    Vector(-1, -2),
    Vector(-2, -1),
];

#[test]
fn steps() {
    assert_eq!(Vector(4, -4).step(), Vector(1, -1));
    assert_eq!(Vector(0, 6).step(), Vector(0, 1));
    assert_eq!(Vector(2, 1).step(), Vector(2, 1));
    assert_eq!(Vector(-2, 4).step(), Vector(-1, 2));
    assert_eq!(Vector(0, 0).step(), Vector(0, 0));
}

#[test]
fn all_is_straight_and_diagonal() {
    for v in STRAIGHT.iter().chain(DIAGONAL.iter()) {
        assert!(ALL.contains(v));
    }
}
