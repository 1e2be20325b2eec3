//! Lossless word tokenizer used as the unit of word-level diffing.

/// Character class of a token run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Space,
    Word,
    Punct,
}

impl TokenClass {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            TokenClass::Space
        } else if c.is_alphanumeric() || matches!(c, '_' | '-' | '\'') {
            TokenClass::Word
        } else {
            TokenClass::Punct
        }
    }
}

/// Split `s` into maximal runs of one [`TokenClass`].
///
/// Concatenating the returned slices reproduces `s` exactly.
pub fn tokenize(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenClass> = None;

    for (i, c) in s.char_indices() {
        let class = TokenClass::of(c);
        match current {
            Some(prev) if prev != class => {
                out.push(&s[start..i]);
                start = i;
                current = Some(class);
            }
            None => current = Some(class),
            _ => {}
        }
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}
