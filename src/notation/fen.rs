//! # Forsyth-Edwards notation.
//!
//! Two flavours are written: full six-field FEN, and the position
//! identifier, which stops after the castling field and adds the en
//! passant square only when a capture is actually possible. Reading
//! accepts three, four or six fields, so either flavour parses.

use chumsky::prelude::*;

use crate::{
    error::InvalidPositionIdentifier,
    model::{
        ChessColor, ChessMan, PieceKind, Square,
        board::{Board, TileView},
        castling::CastlingRight,
        position::Position,
    },
    notation::Parsable,
};

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub position: Position,
    pub halfmove_clock: u16,
    pub fullmove_count: u16,
}

pub fn parse(text: &str) -> Result<FenRecord, InvalidPositionIdentifier> {
    use InvalidPositionIdentifier as E;

    let fields: Vec<&str> = text.split_whitespace().collect();
    if !matches!(fields.len(), 3 | 4 | 6) {
        return Err(E::FieldCount(fields.len()));
    }

    let board = parse_board(fields[0])?;
    let turn = parse_field(turn(), fields[1], E::Turn)?;
    let castling = parse_field(castling(), fields[2], E::Castling)?;
    let en_passant = match fields.get(3) {
        Some(field) => parse_field(en_passant(), field, E::EnPassant)?,
        None => None,
    };

    let expected_row = match turn {
        ChessColor::WHITE => 5,
        ChessColor::BLACK => 2,
    };
    if en_passant.is_some_and(|sq: Square| sq.row() != expected_row) {
        return Err(E::EnPassant(fields[3].to_string()));
    }

    let (halfmove_clock, fullmove_count) = match fields[..] {
        [_, _, _, _, half, full] => (
            counter("halfmove clock", half)?,
            counter("fullmove number", full)?,
        ),
        _ => (0, 1),
    };

    Ok(FenRecord {
        position: Position {
            board,
            turn,
            castling,
            en_passant: en_passant.map(Square::file),
        },
        halfmove_clock,
        fullmove_count,
    })
}

fn parse_field<'s, T>(
    parser: impl Parser<'s, &'s str, T>,
    field: &'s str,
    err: fn(String) -> InvalidPositionIdentifier,
) -> Result<T, InvalidPositionIdentifier> {
    parser
        .then_ignore(end())
        .parse(field)
        .into_result()
        .map_err(|_| err(field.to_string()))
}

fn counter(field: &'static str, value: &str) -> Result<u16, InvalidPositionIdentifier> {
    value
        .parse()
        .map_err(|_| InvalidPositionIdentifier::Counter {
            field,
            value: value.to_string(),
        })
}

fn parse_board(field: &str) -> Result<Board, InvalidPositionIdentifier> {
    use InvalidPositionIdentifier as E;

    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(E::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (i, rank) in ranks.iter().enumerate() {
        let row = 7 - i as u8;
        let mut col = 0u8;
        for c in rank.chars() {
            let run = c.to_digit(10).filter(|d| (1..=8).contains(d));
            let man = match run {
                Some(_) => None,
                None => Some(ChessMan::from_fen_char(c).ok_or(E::UnknownPiece(c))?),
            };
            let width = run.map_or(1, |d| d as u8);
            if col + width > 8 {
                return Err(E::RankLength {
                    rank: row + 1,
                    files: col + width,
                });
            }
            if let Some(man) = man {
                if man.kind() == PieceKind::PAWN && (row == 0 || row == 7) {
                    return Err(E::Board(field.to_string()));
                }
                board.place_piece(Square::new(row, col), man);
            }
            col += width;
        }
        if col != 8 {
            return Err(E::RankLength {
                rank: row + 1,
                files: col,
            });
        }
    }
    Ok(board)
}

fn turn<'s>() -> impl Parser<'s, &'s str, ChessColor> {
    choice((
        just('w').to(ChessColor::WHITE),
        just('b').to(ChessColor::BLACK),
    ))
}

/// `-` or a non-empty subsequence of `KQkq`.
fn castling<'s>() -> impl Parser<'s, &'s str, [bool; 4]> {
    choice((
        just('-').to([false; 4]),
        flag('K')
            .then(flag('Q'))
            .then(flag('k'))
            .then(flag('q'))
            .map(|(((wk, wq), bk), bq)| [wk, wq, bk, bq])
            .filter(|rights: &[bool; 4]| rights.iter().any(|r| *r)),
    ))
}

fn flag<'s>(c: char) -> impl Parser<'s, &'s str, bool> {
    just(c).or_not().map(|x| x.is_some())
}

fn en_passant<'s>() -> impl Parser<'s, &'s str, Option<Square>> {
    choice((just('-').to(None), Square::parser().map(Some)))
}

pub fn write_board(board: &Board) -> String {
    let mut res = String::with_capacity(72);
    for row in (0..8).rev() {
        let mut empty = 0;
        for col in 0..8 {
            match board.tile(Square::new(row, col)) {
                Some(man) => {
                    if empty > 0 {
                        res.push_str(&empty.to_string());
                        empty = 0;
                    }
                    res.push(man.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            res.push_str(&empty.to_string());
        }
        if row > 0 {
            res.push('/');
        }
    }
    res
}

fn write_castling(castling: &[bool; 4]) -> String {
    let res: String = [
        CastlingRight::WHITE_KINGSIDE,
        CastlingRight::WHITE_QUEENSIDE,
        CastlingRight::BLACK_KINGSIDE,
        CastlingRight::BLACK_QUEENSIDE,
    ]
    .into_iter()
    .filter(|right| castling[right.ix()])
    .map(CastlingRight::fen_char)
    .collect();
    if res.is_empty() { "-".to_string() } else { res }
}

fn write_turn(turn: ChessColor) -> char {
    match turn {
        ChessColor::WHITE => 'w',
        ChessColor::BLACK => 'b',
    }
}

/// Board, turn and castling, plus the en passant square when a pawn of
/// the player to move stands ready to take.
pub fn write_identifier(position: &Position) -> String {
    let mut res = format!(
        "{} {} {}",
        write_board(&position.board),
        write_turn(position.turn),
        write_castling(&position.castling)
    );
    if position.is_en_passant_capturable() {
        if let Some(sq) = position.en_passant_square() {
            res.push(' ');
            res.push_str(&sq.to_string());
        }
    }
    res
}

/// All six fields. The en passant square is written whenever a pawn has
/// just made a double step.
pub fn write_fen(position: &Position, halfmove_clock: u16, fullmove_count: u16) -> String {
    format!(
        "{} {} {} {} {} {}",
        write_board(&position.board),
        write_turn(position.turn),
        write_castling(&position.castling),
        position
            .en_passant_square()
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string()),
        halfmove_clock,
        fullmove_count
    )
}

#[test]
fn startpos_round_trip() {
    let text = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let record = parse(text);
    assert_eq!(record.as_ref().map(|r| &r.position), Ok(&Position::startpos()));
    if let Ok(record) = record {
        assert_eq!(
            write_fen(&record.position, record.halfmove_clock, record.fullmove_count),
            text
        );
        assert_eq!(
            write_identifier(&record.position),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"
        );
    }
}

#[test]
fn castling_field() {
    let rights = |s| parse_field(castling(), s, InvalidPositionIdentifier::Castling);
    assert_eq!(rights("KQkq"), Ok([true; 4]));
    assert_eq!(rights("Kq"), Ok([true, false, false, true]));
    assert_eq!(rights("-"), Ok([false; 4]));
    assert!(rights("qK").is_err());
    assert!(rights("KK").is_err());
    assert_eq!(write_castling(&[false, true, true, false]), "Qk");
}

#[test]
fn malformed_identifiers() {
    use InvalidPositionIdentifier as E;
    let err = |s| parse(s).err();
    assert_eq!(err("8/8/8/8/8/8/8/8 w"), Some(E::FieldCount(2)));
    assert_eq!(err("8/8/8/8/8/8/8 w -"), Some(E::RankCount(7)));
    assert_eq!(
        err("8/8/8/8/8/8/8/7 w -"),
        Some(E::RankLength { rank: 1, files: 7 })
    );
    assert_eq!(
        err("8/8/8/8/8/8/8/ppppppppp w -"),
        Some(E::Board("8/8/8/8/8/8/8/ppppppppp".to_string()))
    );
    assert_eq!(
        err("8/8/8/8/8/8/8/RNBQKBNRR w -"),
        Some(E::RankLength { rank: 1, files: 9 })
    );
    let wide = format!("{}/8/8/8/8/8/8/8 w -", "8".repeat(33));
    assert_eq!(parse(&wide).err(), Some(E::RankLength { rank: 8, files: 16 }));
    assert_eq!(
        err("8/8/8/8/8/8/8/44k w -"),
        Some(E::RankLength { rank: 1, files: 9 })
    );
    assert_eq!(
        err("8/8/8/8/8/8/3p4/4x3 w -"),
        Some(E::UnknownPiece('x'))
    );
    assert_eq!(err("8/8/8/8/8/8/8/8 x -"), Some(E::Turn("x".to_string())));
    assert_eq!(
        err("8/8/8/8/8/8/8/8 w KX"),
        Some(E::Castling("KX".to_string()))
    );
    assert_eq!(
        err("8/8/8/8/8/8/8/8 w - e3"),
        Some(E::EnPassant("e3".to_string()))
    );
    assert_eq!(
        err("8/8/8/8/8/8/8/8 w - - -1 1"),
        Some(E::Counter {
            field: "halfmove clock",
            value: "-1".to_string()
        })
    );
}
