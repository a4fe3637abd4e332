//! Natural, punctuation-insensitive string collation for sorting ids and titles.
//!
//! Punctuation and whitespace are ignored, letters compare case-insensitively
//! and runs of digits compare by numeric value, so `note-2` sorts before
//! `note 10`. Accents are folded onto their base letter first (`Émile` sorts
//! with the E's) and only break ties, unaccented first.

use std::cmp::Ordering;
use std::iter::Peekable;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    /// Digit run without leading zeros
    Number(String),
    Letter(char),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Number(_), Chunk::Letter(_)) => Ordering::Less,
            (Chunk::Letter(_), Chunk::Number(_)) => Ordering::Greater,
            (Chunk::Letter(a), Chunk::Letter(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Chunks<I: Iterator<Item = char>> {
    chars: Peekable<I>,
}

impl<I: Iterator<Item = char>> Iterator for Chunks<I> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            let c = self.chars.next()?;
            if c.is_ascii_digit() {
                let mut digits = String::from(c);
                while let Some(d) = self.chars.next_if(char::is_ascii_digit) {
                    digits.push(d);
                }
                let trimmed = digits.trim_start_matches('0');
                return Some(Chunk::Number(trimmed.to_string()));
            }
            if c.is_alphanumeric() {
                return Some(Chunk::Letter(c));
            }
        }
    }
}

/// Chunks with accents stripped
fn base_chunks(s: &str) -> Chunks<impl Iterator<Item = char> + '_> {
    Chunks {
        chars: s
            .nfd()
            .filter(|&c| !is_combining_mark(c))
            .flat_map(char::to_lowercase)
            .peekable(),
    }
}

/// Chunks with accents kept, composed so both encodings compare equal
fn accented_chunks(s: &str) -> Chunks<impl Iterator<Item = char> + '_> {
    Chunks {
        chars: s.nfc().flat_map(char::to_lowercase).peekable(),
    }
}

/// Compare two strings for display ordering
pub fn collate(a: &str, b: &str) -> Ordering {
    base_chunks(a)
        .cmp(base_chunks(b))
        .then_with(|| accented_chunks(a).cmp(accented_chunks(b)))
}
