use chumsky::prelude::*;

use crate::{
    model::{BoardFile, BoardRank, PawnPromotion, PieceKind, Square, castling::CastlingSide},
    notation::{InCheck, Parsable, StdAlgNotation, StdAlgOfficer, StdAlgPawn},
};

impl Parsable for StdAlgNotation {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((
            castling()
                .then(InCheck::parser().or_not())
                .map(|(side, chk)| StdAlgNotation::Castling(side, chk)),
            StdAlgPawn::parser().map(StdAlgNotation::Pawn),
            StdAlgOfficer::parser().map(StdAlgNotation::Officer),
        ))
    }
}

/// Accepts the letter O as well as the digit zero.
fn castling<'s>() -> impl Parser<'s, &'s str, CastlingSide> {
    use CastlingSide::*;
    choice((
        just("O-O-O").to(QUEENSIDE),
        just("0-0-0").to(QUEENSIDE),
        just("O-O").to(KINGSIDE),
        just("0-0").to(KINGSIDE),
    ))
}

impl Parsable for StdAlgPawn {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((
            BoardFile::parser()
                .then_ignore(just('x'))
                .then(Square::parser())
                .map(|(f, to)| (Some(f), to)),
            Square::parser().map(|to| (None, to)),
        ))
        .then(just('=').ignore_then(pawn_promotion()).or_not())
        .then(InCheck::parser().or_not())
        .map(|(((capture_from, to), promotion), check)| StdAlgPawn {
            capture_from,
            to,
            promotion,
            check,
        })
    }
}

fn pawn_promotion<'s>() -> impl Parser<'s, &'s str, PawnPromotion> {
    use PawnPromotion::*;
    choice((
        just('N').to(KNIGHT),
        just('B').to(BISHOP),
        just('R').to(ROOK),
        just('Q').to(QUEEN),
    ))
}

type Disambiguation = (Option<BoardFile>, Option<BoardRank>, bool, Square);

impl Parsable for StdAlgOfficer {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        officer()
            .then(disambiguated_target())
            .then(InCheck::parser().or_not())
            .map(|((kind, (file, rank, capture, to)), check)| StdAlgOfficer {
                kind,
                file,
                rank,
                capture,
                to,
                check,
            })
    }
}

/// Longest alternatives first, so that a lone file or rank is never
/// mistaken for the start of the target square.
fn disambiguated_target<'s>() -> impl Parser<'s, &'s str, Disambiguation> {
    choice((
        BoardFile::parser()
            .then(BoardRank::parser())
            .then(is_it(just('x')))
            .then(Square::parser())
            .map(|(((f, r), x), to)| (Some(f), Some(r), x, to)),
        BoardFile::parser()
            .then(is_it(just('x')))
            .then(Square::parser())
            .map(|((f, x), to)| (Some(f), None, x, to)),
        BoardRank::parser()
            .then(is_it(just('x')))
            .then(Square::parser())
            .map(|((r, x), to)| (None, Some(r), x, to)),
        is_it(just('x'))
            .then(Square::parser())
            .map(|(x, to)| (None, None, x, to)),
    ))
}

fn officer<'s>() -> impl Parser<'s, &'s str, PieceKind> {
    use PieceKind::*;
    choice((
        just('N').to(KNIGHT),
        just('B').to(BISHOP),
        just('R').to(ROOK),
        just('Q').to(QUEEN),
        just('K').to(KING),
    ))
}

pub fn is_it<'s, T>(p: impl Parser<'s, &'s str, T>) -> impl Parser<'s, &'s str, bool> {
    p.or_not().map(|s| s.is_some())
}

impl Parsable for InCheck {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        choice((just('+').to(InCheck::Check), just('#').to(InCheck::Mate)))
    }
}

#[test]
fn officers() {
    let p = |s: &str| match StdAlgNotation::parse_str(s) {
        Some(StdAlgNotation::Officer(o)) => (o.kind, o.file, o.rank, o.capture, o.to),
        other => panic!("{s}: {other:?}"),
    };
    use BoardFile::*;
    use BoardRank::*;
    use PieceKind::*;
    assert_eq!(p("Nf3"), (KNIGHT, None, None, false, Square::f3));
    assert_eq!(p("Nd2"), (KNIGHT, None, None, false, Square::d2));
    assert_eq!(p("Nbd7"), (KNIGHT, Some(b_), None, false, Square::d7));
    assert_eq!(p("N2c3"), (KNIGHT, None, Some(_2), false, Square::c3));
    assert_eq!(p("Qe4c6"), (QUEEN, Some(e_), Some(_4), false, Square::c6));
    assert_eq!(p("Rxd7"), (ROOK, None, None, true, Square::d7));
    assert_eq!(p("Rdxe1+"), (ROOK, Some(d_), None, true, Square::e1));
    assert_eq!(p("Qh4xe1#"), (QUEEN, Some(h_), Some(_4), true, Square::e1));
}

#[test]
fn pawns_and_castles() {
    assert_eq!(
        StdAlgNotation::parse_str("exd6"),
        Some(StdAlgNotation::Pawn(StdAlgPawn {
            capture_from: Some(BoardFile::e_),
            to: Square::d6,
            promotion: None,
            check: None,
        }))
    );
    assert_eq!(
        StdAlgNotation::parse_str("h8=Q+"),
        Some(StdAlgNotation::Pawn(StdAlgPawn {
            capture_from: None,
            to: Square::h8,
            promotion: Some(PawnPromotion::QUEEN),
            check: Some(InCheck::Check),
        }))
    );
    assert_eq!(
        StdAlgNotation::parse_str("O-O-O"),
        Some(StdAlgNotation::Castling(CastlingSide::QUEENSIDE, None))
    );
    assert_eq!(
        StdAlgNotation::parse_str("0-0+"),
        Some(StdAlgNotation::Castling(CastlingSide::KINGSIDE, Some(InCheck::Check)))
    );
    for junk in ["", "e9", "Pe4", "Nf", "e4e5", "O-O-O-O", "h8=K"] {
        assert_eq!(StdAlgNotation::parse_str(junk), None, "{junk}");
    }
}
