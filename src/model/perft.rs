//! Performance test: counting the leaves of the legal move tree.
//!
//! Published node counts for well-known positions make this the standard
//! end-to-end check of move generation, castling, en passant, promotion
//! and the check checker working together.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use strum::VariantArray;

use crate::{
    model::{
        PawnPromotion,
        attacking::LegalityOracle,
        game::{Game, LegalMove},
    },
    notation::CoordNotation,
};

/// Count leaf nodes `depth` plies down, broken down by first move.
pub fn perft<L: LegalityOracle + Clone>(game: &Game<L>, depth: usize) -> PerfTestRes {
    let mut breakdown = BTreeMap::new();
    let now = Instant::now();

    if depth != 0 {
        for (mv, prom) in expand(game) {
            let desc = mv.description();
            let coord = CoordNotation::new(desc.from, desc.to, prom);
            if depth == 1 {
                breakdown.insert(coord, 1);
                continue;
            }
            let mut next = game.clone();
            if next.play_generated(mv, prom).is_ok() {
                breakdown.insert(coord, perft_recurse(&next, depth - 1));
            }
        }
    }

    PerfTestRes {
        elapsed_duration: now.elapsed(),
        breakdown,
        depth,
    }
}

fn perft_recurse<L: LegalityOracle + Clone>(game: &Game<L>, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }
    let moves = expand(game);
    if depth == 1 {
        return moves.len();
    }

    let mut res = 0;
    for (mv, prom) in moves {
        let mut next = game.clone();
        if next.play_generated(mv, prom).is_ok() {
            res += perft_recurse(&next, depth - 1);
        }
    }
    res
}

/// Legal moves, with promotions split into one move per piece.
fn expand<L: LegalityOracle>(game: &Game<L>) -> Vec<(LegalMove, Option<PawnPromotion>)> {
    let mut res = vec![];
    for mv in game.legal_moves() {
        if game.is_promotion(&mv) {
            res.extend(PawnPromotion::VARIANTS.iter().map(|&p| (mv, Some(p))));
        } else {
            res.push((mv, None));
        }
    }
    res
}

pub struct PerfTestRes {
    pub depth: usize,
    pub elapsed_duration: Duration,
    pub breakdown: BTreeMap<CoordNotation, usize>,
}

impl PerfTestRes {
    pub fn nodes(&self) -> usize {
        self.breakdown.values().sum()
    }

    pub fn pretty_print(&self) {
        println!("Performance test depth {}", self.depth);
        for (mv, n) in &self.breakdown {
            println!("{}: {}", mv, n);
        }
        println!(
            "Time elapsed: {:.02}ms",
            self.elapsed_duration.as_secs_f64() * 1000.0
        );
        println!(
            "Nodes per second: {:.02}",
            self.nodes() as f64 / self.elapsed_duration.as_secs_f64()
        );
        println!("Nodes searched: {}", self.nodes())
    }
}

#[test]
fn startpos_perft() {
    let game = Game::new();
    assert_eq!(perft(&game, 0).nodes(), 0);
    assert_eq!(perft(&game, 1).nodes(), 20);
    let res = perft(&game, 2);
    res.pretty_print();
    assert_eq!(res.nodes(), 400);
    assert_eq!(res.breakdown.len(), 20);
}
