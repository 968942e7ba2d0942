use memorchess::{
    Game, IllegalMove, InvalidPositionIdentifier, MoveDescription, PositionIdentifier, Square,
};

fn play(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for mv in moves {
        if let Err(e) = game.play_move(mv) {
            panic!("{mv}: {e}");
        }
    }
    game
}

fn drag(game: &mut Game, from: Square, to: Square) -> Result<String, IllegalMove> {
    game.play_description(MoveDescription::new(from, to))
}

#[test]
fn file_disambiguation_first() {
    let mut game = play(&["Nf3", "Nf6", "Nc3", "Nc6", "Ne4", "a6"]);
    assert_eq!(drag(&mut game, Square::f3, Square::g5), Ok("Nfg5".to_string()));
}

#[test]
fn rank_disambiguation_when_files_agree() {
    let mut game = play(&[
        "e4", "a6", "Ne2", "a5", "Nbc3", "a4", "e5", "a3", "Ne4", "axb2",
    ]);
    assert_eq!(drag(&mut game, Square::e2, Square::c3), Ok("N2c3".to_string()));
}

#[test]
fn full_square_when_neither_suffices() {
    let mut game = Game::from_fen("8/k7/4Q3/8/2Q1Q3/8/K7/8 w - - 0 1").unwrap();
    assert_eq!(drag(&mut game, Square::e4, Square::c6), Ok("Qe4c6".to_string()));
}

#[test]
fn ambiguous_input_is_refused() {
    let mut game = play(&["Nf3", "Nf6", "Nc3", "Nc6", "Ne4", "a6"]);
    assert_eq!(
        game.play_move("Ng5"),
        Err(IllegalMove::Ambiguous {
            text: "Ng5".to_string(),
            count: 2
        })
    );
    assert_eq!(game.play_move("Nfg5"), Ok("Nfg5".to_string()));
}

#[test]
fn pinned_rival_needs_no_disambiguation() {
    // the knight on c3 is pinned against the king by the bishop on b4
    let mut game = Game::from_fen("4k3/8/8/8/1b6/2N5/8/4K1N1 w - -").unwrap();
    assert_eq!(game.play_move("Ne2"), Ok("Ne2".to_string()));
}

#[test]
fn capture_and_castle_names() {
    let mut game = play(&["e4", "d5"]);
    assert_eq!(drag(&mut game, Square::e4, Square::d5), Ok("exd5".to_string()));
    assert_eq!(drag(&mut game, Square::d8, Square::d5), Ok("Qxd5".to_string()));

    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq -").unwrap();
    assert_eq!(drag(&mut game, Square::e8, Square::c8), Ok("O-O-O".to_string()));
    assert_eq!(drag(&mut game, Square::e1, Square::g1), Ok("O-O".to_string()));
}

#[test]
fn coordinate_promotion() {
    let mut game = Game::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - -").unwrap();
    assert_eq!(game.play_coordinates("b7b8n"), Ok("b8=N".to_string()));
    assert!(!game.needs_promotion());
    assert!(matches!(
        game.play_coordinates("e8e9"),
        Err(IllegalMove::Unreadable(_))
    ));
}

#[test]
fn fen_round_trips() {
    for fen in [
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let game = Game::from_fen(fen).unwrap();
        assert_eq!(game.to_fen(), fen);
        assert_eq!(game.to_string(), fen);
    }
}

#[test]
fn played_fen_matches_published() {
    let mut game = play(&["e4", "c5"]);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
    );
    game.play_move("Nf3").unwrap();
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn short_identifiers_parse() {
    let game = Game::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq").unwrap();
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.fullmove_count(), 1);
    assert_eq!(game.identifier(), play(&["e4"]).identifier());
}

#[test]
fn invalid_identifiers() {
    assert_eq!(
        Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0").err(),
        Some(InvalidPositionIdentifier::FieldCount(5))
    );
    assert_eq!(
        Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNZ w KQkq").err(),
        Some(InvalidPositionIdentifier::UnknownPiece('Z'))
    );
    assert_eq!(
        Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1").err(),
        Some(InvalidPositionIdentifier::Counter {
            field: "halfmove clock",
            value: "zero".to_string()
        })
    );
}

#[test]
fn identifiers_serialize_as_plain_strings() {
    let id = play(&["d4"]).identifier();
    let text = toml::to_string(&Wrapper { id: id.clone() }).unwrap();
    assert_eq!(
        text.trim(),
        "id = \"rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq\""
    );
    let back: Wrapper = toml::from_str(&text).unwrap();
    assert_eq!(back.id, id);
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Wrapper {
    id: PositionIdentifier,
}
