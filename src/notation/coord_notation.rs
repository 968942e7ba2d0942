use chumsky::prelude::*;

use crate::{
    model::*,
    notation::{CoordNotation, Parsable},
};

impl Parsable for CoordNotation {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        Square::parser()
            .then(Square::parser())
            .then(pawn_promotion().or_not())
            .map(|((from, to), prom)| Self::new(from, to, prom))
    }
}

fn pawn_promotion<'s>() -> impl Parser<'s, &'s str, PawnPromotion> {
    use PawnPromotion::*;
    choice((
        just('n').to(KNIGHT),
        just('b').to(BISHOP),
        just('r').to(ROOK),
        just('q').to(QUEEN),
    ))
}

#[test]
fn coordinates() {
    assert_eq!(
        CoordNotation::parse_str("e2e4"),
        Some(CoordNotation::new(Square::e2, Square::e4, None))
    );
    assert_eq!(
        CoordNotation::parse_str("a7a8q"),
        Some(CoordNotation::new(Square::a7, Square::a8, Some(PawnPromotion::QUEEN)))
    );
    assert_eq!(CoordNotation::parse_str("a7a8k"), None);
    assert_eq!(CoordNotation::parse_str("e2"), None);
}
