//! Text primitives shared by the reconcilers and the differ.

pub mod chunk;
pub mod similarity;
pub mod tokenize;

pub use chunk::{chunk_paragraphs, chunk_text, encode_paragraphs, Paragraph};
pub use similarity::{levenshtein, similarity};
pub use tokenize::{tokenize, TokenClass};
