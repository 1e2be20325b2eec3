//! Splitting story text into chunks that fit the model's context window.
//!
//! Lengths are counted in `char`s. Chunks never exceed `limit` unless a
//! single paragraph in [`chunk_paragraphs`] is itself longer than the limit.

use serde_json::Value;
use std::collections::HashMap;

const PARAGRAPH_JOINER: &str = "\n\n";

/// A numbered paragraph as delivered by the page scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `text` into chunks of at most `limit` characters.
///
/// Paragraph breaks (two or more newlines) are preferred boundaries, then
/// single newlines, then spaces. A word longer than `limit` is hard-cut.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= limit {
        return vec![text.to_string()];
    }

    let (blocks, joiner) = if has_paragraph_break(text) {
        (split_paragraphs(text), PARAGRAPH_JOINER)
    } else if text.contains('\n') {
        (text.split('\n').collect(), "\n")
    } else {
        (vec![text], " ")
    };

    let mut packer = Packer::new(limit, joiner);
    for block in blocks {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        if char_len(block) <= limit {
            packer.push(block);
        } else {
            for piece in split_by_space(block, limit) {
                packer.push(piece);
            }
        }
    }
    packer.finish()
}

struct Packer<'a> {
    limit: usize,
    joiner: &'a str,
    out: Vec<String>,
    cur: String,
}

impl<'a> Packer<'a> {
    fn new(limit: usize, joiner: &'a str) -> Self {
        Self {
            limit,
            joiner,
            out: Vec::new(),
            cur: String::new(),
        }
    }

    fn fits(&self, piece: &str) -> bool {
        char_len(&self.cur) + char_len(self.joiner) + char_len(piece) <= self.limit
    }

    fn push(&mut self, piece: &str) {
        let piece = piece.trim();
        if piece.is_empty() {
            return;
        }
        if !self.cur.is_empty() {
            if self.fits(piece) {
                self.cur.push_str(self.joiner);
                self.cur.push_str(piece);
                return;
            }
            self.out.push(std::mem::take(&mut self.cur));
        }
        if char_len(piece) <= self.limit {
            self.cur = piece.to_string();
            return;
        }
        for part in split_by_space(piece, self.limit) {
            if self.cur.is_empty() {
                self.cur = part.to_string();
            } else if self.fits(part) {
                self.cur.push_str(self.joiner);
                self.cur.push_str(part);
            } else {
                self.out.push(std::mem::replace(&mut self.cur, part.to_string()));
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        if !self.cur.trim().is_empty() {
            self.out.push(self.cur);
        }
        self.out
    }
}

fn has_paragraph_break(text: &str) -> bool {
    text.contains(PARAGRAPH_JOINER)
}

/// Split on runs of two or more newlines.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            if i - run_start >= 2 {
                out.push(&text[start..run_start]);
                start = i;
            }
        } else {
            i += 1;
        }
    }
    out.push(&text[start..]);
    out
}

/// Break `s` at the last whitespace before `limit` characters, repeatedly.
fn split_by_space(s: &str, limit: usize) -> Vec<&str> {
    let mut s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    while !s.is_empty() {
        if char_len(s) <= limit {
            parts.push(s);
            break;
        }
        match last_whitespace_before(s, limit) {
            Some(idx) if idx > 0 => {
                parts.push(s[..idx].trim());
                s = s[idx..].trim_start();
            }
            _ => {
                let cut = byte_index_at_char(s, limit);
                parts.push(s[..cut].trim());
                s = s[cut..].trim();
            }
        }
    }
    parts
}

fn last_whitespace_before(s: &str, limit: usize) -> Option<usize> {
    s.char_indices()
        .take(limit)
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .last()
}

fn byte_index_at_char(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map(|(i, _)| i).unwrap_or(s.len())
}

/// Group numbered paragraphs so each group's joined text fits in `limit`.
///
/// Keys that are not integers are skipped. A paragraph longer than the limit
/// is emitted as a group of its own.
pub fn chunk_paragraphs(paras: &HashMap<String, String>, limit: usize) -> Vec<Vec<Paragraph>> {
    if limit == 0 || paras.is_empty() {
        return Vec::new();
    }

    let mut paragraphs: Vec<Paragraph> = Vec::with_capacity(paras.len());
    for (key, text) in paras {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        match key.trim().parse::<usize>() {
            Ok(index) => paragraphs.push(Paragraph {
                index,
                text: text.to_string(),
            }),
            Err(_) => {
                tracing::warn!(key = %key, "chunk_paragraphs: paragraph key is not an integer");
            }
        }
    }
    paragraphs.sort_by_key(|p| p.index);

    let joiner_len = char_len(PARAGRAPH_JOINER);
    let mut out: Vec<Vec<Paragraph>> = Vec::new();
    let mut cur: Vec<Paragraph> = Vec::new();
    let mut cur_len = 0;

    for p in paragraphs {
        let len = char_len(&p.text);
        if len > limit {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
                cur_len = 0;
            }
            out.push(vec![p]);
            continue;
        }

        let add = if cur_len > 0 { len + joiner_len } else { len };
        if cur_len + add <= limit {
            cur.push(p);
            cur_len += add;
        } else {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            cur.push(p);
            cur_len = len;
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Encode a paragraph group as the chunk sent to the model.
///
/// The result is a JSON object keyed by paragraph index, in group order:
/// `{"3":"first","4":"second"}`.
pub fn encode_paragraphs(group: &[Paragraph]) -> String {
    let mut out = String::from("{");
    for (i, p) in group.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::from(p.index.to_string()).to_string());
        out.push(':');
        out.push_str(&Value::from(p.text.as_str()).to_string());
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_has_no_chunks() {
        assert!(chunk_text("   \n ", 10).is_empty());
    }

    #[test]
    fn test_short_text_is_single_trimmed_chunk() {
        assert_eq!(chunk_text("  hello world \n", 100), vec!["hello world"]);
    }

    #[test]
    fn test_packs_paragraphs_greedily() {
        let text = "aaaa\n\nbbbb\n\n\ncccc";
        assert_eq!(chunk_text(text, 10), vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn test_falls_back_to_lines() {
        let text = "one two\nthree four\nfive";
        assert_eq!(chunk_text(text, 15), vec!["one two", "three four\nfive"]);
    }

    #[test]
    fn test_splits_long_line_at_spaces() {
        let chunks = chunk_text("alpha beta gamma delta", 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_hard_cuts_words_longer_than_limit() {
        let chunks = chunk_text("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        for chunk in chunk_text(&text, 50) {
            assert!(chunk.chars().count() <= 50, "chunk too long: {chunk:?}");
        }
    }

    #[test]
    fn test_split_paragraphs_requires_two_newlines() {
        assert_eq!(split_paragraphs("a\nb\n\nc"), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_chunk_paragraphs_orders_and_packs() {
        let mut paras = HashMap::new();
        paras.insert("2".to_string(), "cc".to_string());
        paras.insert("0".to_string(), "aa".to_string());
        paras.insert("1".to_string(), "bb".to_string());
        paras.insert("x".to_string(), "ignored".to_string());
        paras.insert("3".to_string(), "   ".to_string());

        let groups = chunk_paragraphs(&paras, 6);
        let indices: Vec<Vec<usize>> = groups
            .iter()
            .map(|g| g.iter().map(|p| p.index).collect())
            .collect();
        assert_eq!(indices, vec![vec![0, 1], vec![2]]);
        assert_eq!(encode_paragraphs(&groups[0]), r#"{"0":"aa","1":"bb"}"#);
    }

    #[test]
    fn test_encoded_group_keeps_index_order_and_escapes() {
        let group = vec![
            Paragraph {
                index: 9,
                text: "She said \"hi\"".to_string(),
            },
            Paragraph {
                index: 10,
                text: "line\nbreak".to_string(),
            },
        ];
        let encoded = encode_paragraphs(&group);
        assert_eq!(encoded, r#"{"9":"She said \"hi\"","10":"line\nbreak"}"#);

        let back: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back["9"], "She said \"hi\"");
        assert_eq!(back["10"], "line\nbreak");
    }

    #[test]
    fn test_empty_group_encodes_as_empty_object() {
        assert_eq!(encode_paragraphs(&[]), "{}");
    }

    #[test]
    fn test_oversized_paragraph_is_its_own_group() {
        let mut paras = HashMap::new();
        paras.insert("0".to_string(), "a".to_string());
        paras.insert("1".to_string(), "way too long".to_string());
        paras.insert("2".to_string(), "b".to_string());

        let groups = chunk_paragraphs(&paras, 4);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1][0].text, "way too long");
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        let mut paras = HashMap::new();
        paras.insert("0".to_string(), "a".to_string());
        assert!(chunk_paragraphs(&paras, 0).is_empty());
    }
}
