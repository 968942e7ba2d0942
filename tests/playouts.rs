use memorchess::{
    ChessColor, ChessMan, CheckChecker, Game, LegalityOracle, PawnPromotion, PieceKind, Position,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use strum::VariantArray;

const OPERA_GAME: &str = "e4 e5 Nf3 d6 d4 Bg4 dxe5 Bxf3 Qxf3 dxe5 Bc4 Nf6 Qb3 Qe7 Nc3 c6 \
    Bg5 b5 Nxb5 cxb5 Bxb5+ Nbd7 O-O-O Rd8 Rxd7 Rxd7 Rd1 Qe6 Bxd7+ Nxd7 Qb8+ Nxb8 Rd8#";

#[test]
fn opera_game_replays_with_the_same_names() {
    let mut game = Game::new();
    for mv in OPERA_GAME.split_whitespace() {
        let name = game.play_move(mv);
        assert_eq!(name, Ok(mv.trim_end_matches(['+', '#']).to_string()));
        assert_invariants(&game);
    }
    assert_eq!(game.turn(), ChessColor::BLACK);
    assert!(game.is_in_check());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.fullmove_count(), 17);
    assert_eq!(
        game.identifier().as_str(),
        "1n1Rkb1r/p4ppp/4q3/4p1B1/4P3/8/PPP2PPP/2K5 b k"
    );
}

fn assert_invariants(game: &Game) {
    let board = game.board();
    for color in [ChessColor::WHITE, ChessColor::BLACK] {
        assert_eq!(
            board.positions_of(ChessMan::new(color, PieceKind::KING)).len(),
            1,
            "{game}"
        );
    }

    let mut indexed: Vec<_> = board.indexed().collect();
    indexed.sort_by_key(|(sq, _)| *sq);
    assert_eq!(indexed, board.occupied().collect::<Vec<_>>(), "{game}");

    let id = game.identifier();
    let reparsed = Position::from_identifier(id.as_str()).map(|p| p.identifier());
    assert_eq!(reparsed, Ok(id.clone()));

    let fen = game.to_fen();
    assert_eq!(Game::from_fen(&fen).map(|g| g.to_fen()), Ok(fen));
}

#[test]
fn random_playouts_keep_invariants() {
    for seed in 0..12 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..120 {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }

            for mv in &moves {
                let first = CheckChecker.is_legal(game.position(), &mv.get());
                let second = CheckChecker.is_legal(game.position(), &mv.get());
                assert!(first && second);
            }

            let mv = moves[rng.random_range(0..moves.len())];
            let name = game.name_of(&mv, None);
            let promotion = game.is_promotion(&mv).then(|| {
                PawnPromotion::VARIANTS[rng.random_range(0..PawnPromotion::VARIANTS.len())]
            });

            let mut replay = game.clone();
            let played = game.play_legal(mv, promotion);
            assert!(played.is_ok(), "seed {seed}: {name} in {replay}");

            // the name it was given must lead to the same position
            let text = match promotion {
                Some(p) => format!("{name}={}", PieceKind::from(p).letter()),
                None => name,
            };
            assert_eq!(replay.play_move(&text), played, "seed {seed}");
            assert_eq!(replay.to_fen(), game.to_fen());

            assert_invariants(&game);
        }
    }
}
