//! Canonical test printer.
//!
//! Merges booked tokens and placed annotations by offset. Pieces are joined
//! with one space; a blank-line hint becomes a raw newline.

use dectree::{PositionedTree, TextSize};

enum Piece<'a> {
    Token(&'a str),
    Annotation(&'a str),
}

pub fn print(tree: &PositionedTree) -> String {
    let tokens = tree.tokens();
    let mut pieces: Vec<(TextSize, u8, Piece<'_>)> = Vec::new();
    for annotation in tree.annotations() {
        pieces.push((annotation.offset, 0, Piece::Annotation(annotation.text.as_str())));
    }
    for token in &tokens {
        pieces.push((token.offset, 1, Piece::Token(token.text.as_str())));
    }
    pieces.sort_by_key(|(offset, order, _)| (*offset, *order));

    let mut out = String::new();
    for (_, _, piece) in pieces {
        let text = match piece {
            Piece::Annotation("\n") => {
                out.push('\n');
                continue;
            }
            Piece::Annotation(text) | Piece::Token(text) => text,
        };
        if !out.is_empty() && !out.ends_with('\n') {
            out.push(' ');
        }
        out.push_str(text);
    }
    out
}
