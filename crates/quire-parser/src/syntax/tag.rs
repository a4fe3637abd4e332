//! Tag grammar: `#name`, `#parent/child`

use super::script::{is_tag_char, is_tag_letter};
use super::{run, Capture, Machine, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagState {
    Hash,
    /// Expecting a supported-script letter
    First,
    Body,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TagMachine;

impl Machine for TagMachine {
    type State = TagState;

    fn start(&self) -> TagState {
        TagState::Hash
    }

    fn transition(&self, state: TagState, ch: Option<char>) -> Step<TagState> {
        match (state, ch) {
            (TagState::Hash, Some('#')) => Step::Next(TagState::First, Capture::Skip),
            (TagState::First, Some(c)) if is_tag_letter(c) => Step::Next(TagState::Body, Capture::Primary),
            (TagState::Body, Some(c)) if is_tag_char(c) => Step::Next(TagState::Body, Capture::Primary),
            (TagState::Body, _) => Step::Accept { consumed: false },
            _ => Step::Reject,
        }
    }
}

/// A tag may only start at the beginning of input or after whitespace
pub fn is_tag_boundary(prev: Option<char>) -> bool {
    prev.map_or(true, char::is_whitespace)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub name: String,
    pub len: usize,
}

/// Match a tag at the start of `input`, given the character before it
pub fn scan_tag(input: &str, prev: Option<char>) -> Option<TagMatch> {
    if !is_tag_boundary(prev) {
        return None;
    }
    let matched = run(&TagMachine, input)?;
    Some(TagMatch {
        name: matched.captures.primary,
        len: matched.len,
    })
}

/// Every `/`-delimited ancestor of a tag name, shortest first, then the name itself
pub fn tag_with_ancestors(name: &str) -> impl Iterator<Item = &str> {
    let name = name.trim_end_matches('/');
    name.match_indices('/')
        .map(move |(i, _)| &name[..i])
        .filter(|prefix| !prefix.is_empty() && !prefix.ends_with('/'))
        .chain(std::iter::once(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#hello-world", "hello-world" ; "hyphen")]
    #[test_case("#a/b/c", "a/b/c" ; "nested")]
    #[test_case("#snake_case2", "snake_case2" ; "underscore and digit")]
    #[test_case("#café.", "café" ; "stops at punctuation")]
    #[test_case("#привет мир", "привет" ; "stops at space")]
    #[test_case("#नमस्ते", "नमस्ते" ; "devanagari with marks")]
    #[test_case("#中文", "中文" ; "cjk")]
    fn test_scan_tag(input: &str, name: &str) {
        let m = scan_tag(input, None).expect("should match");
        assert_eq!(m.name, name);
        assert_eq!(m.len, 1 + name.len());
    }

    #[test_case("#" ; "bare hash")]
    #[test_case("#1abc" ; "leading digit")]
    #[test_case("# heading" ; "space")]
    #[test_case("#-x" ; "leading hyphen")]
    #[test_case("#ひらがな" ; "hiragana")]
    #[test_case("#ไทย" ; "thai")]
    fn test_scan_tag_rejects(input: &str) {
        assert_eq!(scan_tag(input, None), None);
    }

    #[test]
    fn test_tag_boundary() {
        assert!(scan_tag("#tag", Some(' ')).is_some());
        assert!(scan_tag("#tag", Some('\n')).is_some());
        assert!(scan_tag("#tag", Some('a')).is_none());
        assert!(scan_tag("#tag", Some('(')).is_none());
    }

    #[test]
    fn test_tag_with_ancestors() {
        assert_eq!(tag_with_ancestors("a/b/c").collect::<Vec<_>>(), vec!["a", "a/b", "a/b/c"]);
        assert_eq!(tag_with_ancestors("solo").collect::<Vec<_>>(), vec!["solo"]);
        assert_eq!(tag_with_ancestors("a/").collect::<Vec<_>>(), vec!["a"]);
    }
}
