//! Book source text: blocks, spans and the line grammar.

pub mod block;
pub mod grammar;

pub use block::{CommitmentBlock, SourceSpan};
pub use grammar::{parse_book, parse_book_with, ParsedBook};
