//! Unicode script tables for tag names
//!
//! Tags start with a letter from a supported script and continue with
//! letters, digits and combining marks from those scripts. Japanese kana,
//! Thai and Ethiopic are deliberately not in the table.

/// Letter ranges of supported scripts, inclusive
const LETTER_RANGES: &[(char, char)] = &[
    // Latin
    ('A', 'Z'),
    ('a', 'z'),
    ('\u{00C0}', '\u{024F}'),
    ('\u{1E00}', '\u{1EFF}'),
    // Greek
    ('\u{0370}', '\u{03FF}'),
    ('\u{1F00}', '\u{1FFF}'),
    // Cyrillic
    ('\u{0400}', '\u{052F}'),
    // Armenian
    ('\u{0530}', '\u{058F}'),
    // Hebrew
    ('\u{05D0}', '\u{05EA}'),
    // Arabic
    ('\u{0620}', '\u{064A}'),
    ('\u{066E}', '\u{06D3}'),
    ('\u{0750}', '\u{077F}'),
    // Devanagari
    ('\u{0904}', '\u{0939}'),
    ('\u{0958}', '\u{0961}'),
    ('\u{0972}', '\u{097F}'),
    // CJK unified ideographs and extension A
    ('\u{3400}', '\u{4DBF}'),
    ('\u{4E00}', '\u{9FFF}'),
    // Hangul jamo, compatibility jamo and syllables
    ('\u{1100}', '\u{11FF}'),
    ('\u{3130}', '\u{318F}'),
    ('\u{AC00}', '\u{D7AF}'),
];

/// Vowel signs and points that attach to a preceding letter
const MARK_RANGES: &[(char, char)] = &[
    ('\u{0591}', '\u{05C7}'),
    ('\u{064B}', '\u{065F}'),
    ('\u{0670}', '\u{0670}'),
    ('\u{0900}', '\u{0903}'),
    ('\u{093A}', '\u{094F}'),
    ('\u{0951}', '\u{0957}'),
    ('\u{0962}', '\u{0963}'),
];

const DIGIT_RANGES: &[(char, char)] = &[
    ('0', '9'),
    // Arabic-Indic and extended Arabic-Indic
    ('\u{0660}', '\u{0669}'),
    ('\u{06F0}', '\u{06F9}'),
    // Devanagari
    ('\u{0966}', '\u{096F}'),
];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
}

/// A letter that may start a tag
pub fn is_tag_letter(c: char) -> bool {
    c.is_alphabetic() && in_ranges(c, LETTER_RANGES)
}

pub fn is_tag_digit(c: char) -> bool {
    in_ranges(c, DIGIT_RANGES)
}

/// A character that may continue a tag
pub fn is_tag_char(c: char) -> bool {
    is_tag_letter(c)
        || is_tag_digit(c)
        || in_ranges(c, MARK_RANGES)
        || matches!(c, '_' | '-' | '/')
}
