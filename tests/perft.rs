//! Node counts from the chess programming wiki's perft results page.

use memorchess::{Game, perft};

fn count(fen: &str, depth: usize) -> usize {
    let game = Game::from_fen(fen).unwrap();
    perft(&game, depth).nodes()
}

#[test]
fn initial_position() {
    let game = Game::new();
    assert_eq!(perft(&game, 1).nodes(), 20);
    assert_eq!(perft(&game, 2).nodes(), 400);
    assert_eq!(perft(&game, 3).nodes(), 8902);
}

#[test]
fn kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(count(fen, 1), 48);
    assert_eq!(count(fen, 2), 2039);
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(count(fen, 1), 14);
    assert_eq!(count(fen, 2), 191);
    assert_eq!(count(fen, 3), 2812);
}

#[test]
fn promotions_and_castling_under_fire() {
    let fen = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    assert_eq!(count(fen, 1), 6);
    assert_eq!(count(fen, 2), 264);
}

#[test]
fn discovered_promotions() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(count(fen, 1), 44);
    assert_eq!(count(fen, 2), 1486);
}
