use chumsky::prelude::*;

use crate::{model::*, notation::Parsable};

impl Parsable for BoardFile {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        one_of("abcdefgh").map(|c: char| Self::from_u8(c as u8 - b'a'))
    }
}

impl Parsable for BoardRank {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        one_of("12345678").map(|c: char| Self::from_u8(c as u8 - b'1'))
    }
}

impl Parsable for Square {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        BoardFile::parser()
            .then(BoardRank::parser())
            .map(|(f, r)| Self::from_coords(f, r))
    }
}

#[test]
fn test_square_parser() {
    use strum::IntoEnumIterator;

    for sq in Square::iter() {
        let sqs = sq.to_string();
        assert_eq!(Square::parse_str(&sqs), Some(sq), "unable to parse {sqs}");
    }
    assert_eq!(Square::parse_str("i1"), None);
    assert_eq!(Square::parse_str("a9"), None);
    assert_eq!(Square::parse_str("a1 "), None);
    assert_eq!(BoardRank::parse_str("8"), Some(BoardRank::_8));
}
