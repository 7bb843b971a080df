//! Corpus index implementations

pub mod lexical;

pub use lexical::LexicalIndex;
