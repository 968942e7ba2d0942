use memorchess::{
    Board, ChessColor, ChessMan, Game, IllegalMove, MoveDescription, PawnPromotion, Position,
    Square, TileView,
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

fn board_with(pieces: &[(Square, ChessMan)]) -> Game {
    let mut board = Board::empty();
    for &(sq, man) in pieces {
        board.place_piece(sq, man);
    }
    Game::from_position(Position::new(board))
}

#[test]
fn king_pawn_opening_identifier() {
    let game = play(&["e4"]);
    let id = game.identifier();
    let fields: Vec<&str> = id.as_str().split(' ').collect();
    assert_eq!(fields[0], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    assert_eq!(fields[1], "b");
    assert_eq!(fields[2], "KQkq");
    // no black pawn stands beside e4
    assert_eq!(fields.len(), 3);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn check_must_be_answered() {
    let mut game = play(&["e4", "f5", "d4", "d5", "Qh5+"]);
    assert!(game.is_in_check());
    let before = game.identifier();

    assert!(matches!(game.play_move("h6"), Err(IllegalMove::KingInCheck(_))));
    assert!(matches!(game.play_move("Kf7"), Err(IllegalMove::KingInCheck(_))));
    assert_eq!(game.identifier(), before);

    let mut blocked = game.clone();
    assert_eq!(blocked.play_move("g6"), Ok("g6".to_string()));
    assert!(!blocked.is_in_check());

    assert_eq!(game.play_move("Kd7"), Ok("Kd7".to_string()));
}

#[test]
fn queenside_castle_with_bare_king_and_rook() {
    let mut game = board_with(&[
        (Square::e1, ChessMan::WHITE_KING),
        (Square::a1, ChessMan::WHITE_ROOK),
    ]);
    assert_eq!(game.play_move("O-O-O"), Ok("O-O-O".to_string()));
    assert_eq!(game.board().tile(Square::c1), Some(ChessMan::WHITE_KING));
    assert_eq!(game.board().tile(Square::d1), Some(ChessMan::WHITE_ROOK));
    assert_eq!(game.board().tile(Square::a1), None);
    assert_eq!(game.board().tile(Square::e1), None);
    assert!(!game.castling()[0]);
    assert!(!game.castling()[1]);
}

#[test]
fn kingside_castle_by_dragging_onto_the_rook() {
    let mut game = board_with(&[
        (Square::e1, ChessMan::WHITE_KING),
        (Square::h1, ChessMan::WHITE_ROOK),
        (Square::e8, ChessMan::BLACK_KING),
    ]);
    assert_eq!(
        game.play_description(MoveDescription::new(Square::e1, Square::h1)),
        Ok("O-O".to_string())
    );
    assert_eq!(game.board().tile(Square::g1), Some(ChessMan::WHITE_KING));
    assert_eq!(game.board().tile(Square::f1), Some(ChessMan::WHITE_ROOK));
}

#[test]
fn castling_rights_are_lost_for_good() {
    let mut game = play(&["e4", "e5", "Ke2", "Ke7", "Ke1", "Ke8"]);
    assert_eq!(game.castling(), [false; 4]);
    assert!(game.identifier().as_str().ends_with(" w -"));
    assert!(game.play_move("Nf3").is_ok());

    let game = play(&["h4", "a5", "Rh3", "Ra6", "Rh1", "Ra8"]);
    assert_eq!(game.castling(), [false, true, true, false]);
}

#[test]
fn promotion_with_the_piece_named() {
    let mut game = board_with(&[(Square::h7, ChessMan::WHITE_PAWN)]);
    assert_eq!(game.play_move("h8=Q"), Ok("h8=Q".to_string()));
    assert_eq!(game.board().tile(Square::h8), Some(ChessMan::WHITE_QUEEN));
    assert!(!game.needs_promotion());
    assert_eq!(game.turn(), ChessColor::BLACK);
}

#[test]
fn promotion_chosen_afterwards() {
    let mut game = board_with(&[
        (Square::e1, ChessMan::WHITE_KING),
        (Square::e8, ChessMan::BLACK_KING),
        (Square::b7, ChessMan::WHITE_PAWN),
        (Square::a8, ChessMan::BLACK_ROOK),
    ]);
    assert_eq!(
        game.play_description(MoveDescription::new(Square::b7, Square::a8)),
        Ok("bxa8".to_string())
    );
    assert!(game.needs_promotion());
    assert_eq!(game.play_move("Ke7"), Err(IllegalMove::PromotionPending));
    assert_eq!(game.apply_promotion(PawnPromotion::ROOK), Ok(()));
    assert_eq!(game.board().tile(Square::a8), Some(ChessMan::WHITE_ROOK));
    assert!(game.board().positions_of(ChessMan::BLACK_ROOK).is_empty());
    assert_eq!(game.play_move("Kd7"), Ok("Kd7".to_string()));
}

#[test]
fn en_passant_capture() {
    let mut game = play(&["h3", "b5", "h4", "b4", "a4"]);
    assert!(game.identifier().as_str().ends_with(" b KQkq a3"));
    assert_eq!(game.play_move("bxa3"), Ok("bxa3".to_string()));
    assert_eq!(game.board().tile(Square::a4), None);
    assert_eq!(game.board().tile(Square::a3), Some(ChessMan::BLACK_PAWN));
    assert_eq!(game.board().tile(Square::b4), None);
    assert_eq!(game.halfmove_clock(), 0);
    assert_eq!(game.board().positions_of(ChessMan::WHITE_PAWN).len(), 7);
}

#[test]
fn en_passant_expires() {
    let mut game = play(&["h3", "b5", "h4", "b4", "a4", "Nf6"]);
    assert_eq!(game.play_move("Nf3"), Ok("Nf3".to_string()));
    assert!(matches!(game.play_move("bxa3"), Err(_)));
}

#[test]
fn white_en_passant() {
    let mut game = play(&["e4", "a6", "e5", "d5"]);
    assert!(game.identifier().as_str().ends_with(" w KQkq d6"));
    assert_eq!(game.play_move("exd6"), Ok("exd6".to_string()));
    assert_eq!(game.board().tile(Square::d5), None);
}

#[test]
fn pawns_cannot_jump_three() {
    let mut game = Game::new();
    assert!(game.play_move("a5").is_err());
    assert_eq!(
        game.play_description(MoveDescription::new(Square::a2, Square::a5)),
        Err(IllegalMove::Shape(MoveDescription::new(Square::a2, Square::a5)))
    );
    let mut game = play(&["a4", "a5"]);
    assert_eq!(
        game.play_description(MoveDescription::new(Square::a4, Square::a5)),
        Err(IllegalMove::Blocked(MoveDescription::new(Square::a4, Square::a5)))
    );
}

#[test]
fn transpositions_share_an_identifier() {
    let a = play(&["Nf3", "Nf6", "Nc3", "Nc6"]);
    let b = play(&["Nc3", "Nc6", "Nf3", "Nf6"]);
    assert_eq!(a.identifier(), b.identifier());

    let pushed = play(&["e4"]);
    let shuffled = play(&["e4", "Nf6", "Nf3", "Ng8", "Ng1"]);
    assert_eq!(pushed.identifier(), shuffled.identifier());
    assert_ne!(pushed.to_fen(), shuffled.to_fen());
}

#[test]
fn checkmate_is_derived() {
    let game = play(&["f3", "e5", "g4", "Qh4#"]);
    assert!(game.is_in_check());
    assert!(game.legal_moves().is_empty());

    let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
    assert!(!stalemate.is_in_check());
    assert!(stalemate.legal_moves().is_empty());
}
