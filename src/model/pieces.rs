//! How each kind of chessman moves, as pure geometry.
//!
//! Nothing here looks at the board. Whether a square is free, holds
//! something to capture or blocks a ray is decided by the
//! [`MoveFactory`](crate::model::movegen::MoveFactory).

use crate::model::{
    ChessColor, ChessMan, PieceKind, Square,
    castling::CastlingRight,
    moving::MoveDescription,
    vectors::{self, Vector},
};

/// Behaviour of the vector-uniform pieces: which directions they step in,
/// and whether they keep stepping until the edge of the board.
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    pub vectors: &'static [Vector],
    pub repeats: bool,
}

/// `None` for the pawn, which is not vector-uniform.
pub fn mover(kind: PieceKind) -> Option<Mover> {
    use PieceKind::*;
    let (vectors, repeats): (&'static [Vector], bool) = match kind {
        PAWN => return None,
        KNIGHT => (&vectors::KNIGHT, false),
        BISHOP => (&vectors::DIAGONAL, true),
        ROOK => (&vectors::STRAIGHT, true),
        QUEEN => (&vectors::ALL, true),
        KING => (&vectors::ALL, false),
    };
    Some(Mover { vectors, repeats })
}

/// Candidate moves from a square, grouped into rays.
///
/// Within a ray the moves are ordered outward, so a caller can stop at the
/// first occupied square. Finite movers produce one single-move ray per
/// vector. The pawn produces its forward push (one or two steps) as one
/// ray and each diagonal as its own ray. Castling is not a ray.
pub fn candidate_rays(man: ChessMan, from: Square) -> Vec<Vec<MoveDescription>> {
    let Some(m) = mover(man.kind()) else {
        return pawn_rays(man.color(), from);
    };

    let mut rays = Vec::with_capacity(m.vectors.len());
    for &v in m.vectors {
        let mut ray = vec![];
        let mut at = from.offset(v);
        while let Some(to) = at {
            ray.push(MoveDescription::new(from, to));
            at = if m.repeats { to.offset(v) } else { None };
        }
        if !ray.is_empty() {
            rays.push(ray);
        }
    }
    rays
}

fn pawn_rays(color: ChessColor, from: Square) -> Vec<Vec<MoveDescription>> {
    let f = color.forward();
    let mut rays = Vec::with_capacity(3);

    let mut push = vec![];
    if let Some(one) = from.offset(Vector(f, 0)) {
        push.push(MoveDescription::new(from, one));
        if from.row() == color.pawn_row() {
            if let Some(two) = from.offset(Vector(2 * f, 0)) {
                push.push(MoveDescription::new(from, two));
            }
        }
    }
    if !push.is_empty() {
        rays.push(push);
    }

    for side in [-1, 1] {
        if let Some(to) = from.offset(Vector(f, side)) {
            rays.push(vec![MoveDescription::new(from, to)]);
        }
    }
    rays
}

/// Does this move match the movement shape of the chessman?
///
/// The king additionally accepts castling from its home square, written
/// either as its own destination (`e1` to `g1`) or as the rook's square
/// (`e1` to `h1`).
pub fn is_move_possible(man: ChessMan, desc: MoveDescription) -> bool {
    if man.kind() == PieceKind::KING && castle_shape(man.color(), desc).is_some() {
        return true;
    }
    if man.kind() == PieceKind::PAWN {
        let Vector(dr, dc) = desc.vector();
        let f = man.color().forward();
        return (dr == f && dc.abs() <= 1)
            || (dr == 2 * f && dc == 0 && desc.from.row() == man.color().pawn_row());
    }
    attack_shape(man, desc)
}

/// Could this chessman capture on `desc.to`, board permitting?
///
/// Pawns only attack diagonally, and castling never attacks.
pub fn attack_shape(man: ChessMan, desc: MoveDescription) -> bool {
    let v = desc.vector();
    if v == Vector(0, 0) {
        return false;
    }
    match mover(man.kind()) {
        None => v.0 == man.color().forward() && v.1.abs() == 1,
        Some(m) if m.repeats => m.vectors.contains(&v.step()),
        Some(m) => m.vectors.contains(&v),
    }
}

/// The castling right a king move of this shape would use.
pub fn castle_shape(color: ChessColor, desc: MoveDescription) -> Option<CastlingRight> {
    CastlingRight::of_color(color).into_iter().find(|right| {
        let rules = right.rules();
        desc.from == rules.king_start && (desc.to == rules.king_end || desc.to == rules.rook_start)
    })
}

#[test]
fn knight_in_the_corner() {
    let rays = candidate_rays(ChessMan::WHITE_KNIGHT, Square::a1);
    let mut tos: Vec<_> = rays.iter().flatten().map(|d| d.to).collect();
    tos.sort();
    assert_eq!(tos, vec![Square::c2, Square::b3]);
}

#[test]
fn rook_rays_run_to_the_edge() {
    let rays = candidate_rays(ChessMan::BLACK_ROOK, Square::d4);
    assert_eq!(rays.len(), 4);
    assert_eq!(rays.iter().map(Vec::len).sum::<usize>(), 14);
    let east = &rays[0];
    assert_eq!(
        east.iter().map(|d| d.to).collect::<Vec<_>>(),
        vec![Square::e4, Square::f4, Square::g4, Square::h4]
    );
}

#[test]
fn pawn_geometry() {
    let rays = candidate_rays(ChessMan::WHITE_PAWN, Square::e2);
    assert_eq!(rays[0].iter().map(|d| d.to).collect::<Vec<_>>(), vec![Square::e3, Square::e4]);
    assert_eq!(rays.len(), 3);

    let rays = candidate_rays(ChessMan::BLACK_PAWN, Square::a6);
    assert_eq!(rays[0].len(), 1);
    assert_eq!(rays.len(), 2);

    let d = |a, b| MoveDescription::new(Square::named(a), Square::named(b));
    assert!(is_move_possible(ChessMan::WHITE_PAWN, d("e2", "e4")));
    assert!(!is_move_possible(ChessMan::WHITE_PAWN, d("e3", "e5")));
    assert!(!is_move_possible(ChessMan::WHITE_PAWN, d("e3", "e2")));
    assert!(is_move_possible(ChessMan::BLACK_PAWN, d("d5", "e4")));
    assert!(!attack_shape(ChessMan::BLACK_PAWN, d("d5", "d4")));
}

#[test]
fn king_castle_shapes() {
    let d = |a, b| MoveDescription::new(Square::named(a), Square::named(b));
    assert!(is_move_possible(ChessMan::WHITE_KING, d("e1", "g1")));
    assert!(is_move_possible(ChessMan::WHITE_KING, d("e1", "a1")));
    assert!(!is_move_possible(ChessMan::WHITE_KING, d("e8", "g8")));
    assert!(is_move_possible(ChessMan::BLACK_KING, d("e8", "c8")));
    assert!(!attack_shape(ChessMan::WHITE_KING, d("e1", "g1")));
    assert!(!is_move_possible(ChessMan::WHITE_KING, d("e2", "g2")));
}

#[test]
fn slider_shapes() {
    let d = |a, b| MoveDescription::new(Square::named(a), Square::named(b));
    assert!(is_move_possible(ChessMan::WHITE_BISHOP, d("c1", "h6")));
    assert!(!is_move_possible(ChessMan::WHITE_BISHOP, d("c1", "c4")));
    assert!(is_move_possible(ChessMan::WHITE_QUEEN, d("d1", "d8")));
    assert!(!is_move_possible(ChessMan::WHITE_QUEEN, d("d1", "e3")));
    assert!(is_move_possible(ChessMan::WHITE_KNIGHT, d("g1", "f3")));
    assert!(!is_move_possible(ChessMan::WHITE_ROOK, d("a1", "a1")));
}
