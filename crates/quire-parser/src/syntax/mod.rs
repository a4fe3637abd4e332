//! Inline syntax state machines
//!
//! Each construct of the markdown dialect is recognized by a small finite
//! state machine with an explicit state enum and a pure transition function:
//!
//! - [`wikilink::LinkMachine`] - `[[id]]`, `[[id|text]]`, and with `embed`
//!   set, `![[id]]`, `![[id|text]]`
//! - [`tag::TagMachine`] - `#name`, `#nested/name`
//! - [`priority::PriorityMachine`] - `!!1`, `!!2`, `!!3`
//!
//! Machines are driven by [`run`] over a string slice starting at its first
//! byte. A run either commits (returning the consumed length and captured
//! text) or fails without side effects, letting the caller emit the
//! characters as plain text.
//!
//! [`tokenize`] drives all machines over a whole string. The markdown-it
//! plugins in [`crate::markdown_it`] drive them from inside the host parser,
//! which keeps them out of code spans and fenced code.

pub mod priority;
pub mod script;
pub mod tag;
pub mod wikilink;

use std::ops::Range;

pub use priority::{scan_priority, PriorityMachine};
pub use tag::{scan_tag, TagMachine};
pub use wikilink::{scan_embed, scan_wikilink, LinkMachine};

/// Where a consumed character goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Syntax character, not captured
    Skip,
    /// First payload slot (id, tag name, priority digit)
    Primary,
    /// Second payload slot (custom link text)
    Secondary,
}

/// Result of feeding one character (or end of input) to a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    /// Consume the character and move to the next state
    Next(S, Capture),
    /// Match complete. `consumed` says whether the current character is part of it.
    Accept { consumed: bool },
    /// No match at this position
    Reject,
}

/// A finite state machine over characters
pub trait Machine {
    type State: Copy;

    fn start(&self) -> Self::State;

    /// Pure transition. `ch` is `None` at end of input.
    fn transition(&self, state: Self::State, ch: Option<char>) -> Step<Self::State>;
}

/// Captured payload of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    pub primary: String,
    pub secondary: Option<String>,
}

/// A committed match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Bytes consumed from the start of the input
    pub len: usize,
    pub captures: Captures,
}

/// Drive `machine` over `input` from its first byte
pub fn run<M: Machine>(machine: &M, input: &str) -> Option<Run> {
    let mut state = machine.start();
    let mut captures = Captures::default();
    let mut chars = input.char_indices();

    loop {
        let next = chars.next();
        let ch = next.map(|(_, c)| c);
        let offset = next.map(|(i, _)| i).unwrap_or(input.len());

        match machine.transition(state, ch) {
            Step::Next(next_state, capture) => {
                // Next is only returned for real characters
                let c = ch?;
                match capture {
                    Capture::Skip => {}
                    Capture::Primary => captures.primary.push(c),
                    Capture::Secondary => captures.secondary.get_or_insert_with(String::new).push(c),
                }
                state = next_state;
            }
            Step::Accept { consumed } => {
                let len = match (consumed, ch) {
                    (true, Some(c)) => offset + c.len_utf8(),
                    _ => offset,
                };
                return Some(Run { len, captures });
            }
            Step::Reject => return None,
        }
    }
}

/// Kind and payload of an inline token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Text(String),
    Wikilink { id: String, text: Option<String> },
    Embed { id: String, text: Option<String> },
    Tag { name: String },
    Priority { level: u8 },
}

/// An inline token with its byte range in the tokenized string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// End of the code span opening at the backtick run starting `input`.
///
/// A span closes at the next run of exactly the same length. Without one the
/// opening run is literal text, and only the run itself is skipped.
fn code_span_len(input: &str) -> usize {
    let ticks = input.len() - input.trim_start_matches('`').len();
    let mut pos = ticks;
    while let Some(found) = input[pos..].find('`') {
        let start = pos + found;
        let run = input[start..].len() - input[start..].trim_start_matches('`').len();
        if run == ticks {
            return start + run;
        }
        pos = start + run;
    }
    ticks
}

/// Tokenize plain inline text without a host markdown parser.
///
/// Used on raw fragments such as a single task line. Backtick code spans are
/// kept as plain text, as the markdown-it plugins never see them either.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(ch) = rest.chars().next() else { break };

        let matched = match ch {
            '!' => scan_embed(rest)
                .map(|m| {
                    (
                        TokenKind::Embed {
                            id: m.id,
                            text: m.text,
                        },
                        m.len,
                    )
                })
                .or_else(|| scan_priority(rest).map(|m| (TokenKind::Priority { level: m.level }, m.len))),
            '[' => scan_wikilink(rest).map(|m| {
                (
                    TokenKind::Wikilink {
                        id: m.id,
                        text: m.text,
                    },
                    m.len,
                )
            }),
            '#' => {
                let prev = input[..pos].chars().next_back();
                scan_tag(rest, prev).map(|m| (TokenKind::Tag { name: m.name }, m.len))
            }
            '`' => {
                pos += code_span_len(rest);
                continue;
            }
            _ => None,
        };

        match matched {
            Some((kind, len)) => {
                if text_start < pos {
                    tokens.push(Token {
                        kind: TokenKind::Text(input[text_start..pos].to_string()),
                        range: text_start..pos,
                    });
                }
                tokens.push(Token {
                    kind,
                    range: pos..pos + len,
                });
                pos += len;
                text_start = pos;
            }
            None => pos += ch.len_utf8(),
        }
    }

    if text_start < input.len() {
        tokens.push(Token {
            kind: TokenKind::Text(input[text_start..].to_string()),
            range: text_start..input.len(),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_extra_leading_brackets_are_literal() {
        assert_eq!(
            kinds("[[[123]]]"),
            vec![
                TokenKind::Text("[".to_string()),
                TokenKind::Wikilink {
                    id: "123".to_string(),
                    text: None
                },
                TokenKind::Text("]".to_string()),
            ]
        );
    }

    #[test]
    fn test_embeds_fixture() {
        assert_eq!(
            kinds("![[123|hello]] ![[456]]"),
            vec![
                TokenKind::Embed {
                    id: "123".to_string(),
                    text: Some("hello".to_string())
                },
                TokenKind::Text(" ".to_string()),
                TokenKind::Embed {
                    id: "456".to_string(),
                    text: None
                },
            ]
        );
    }

    #[test]
    fn test_priority_inside_text() {
        let tokens = tokenize("Task !!2 with priority");
        assert_eq!(tokens[1].kind, TokenKind::Priority { level: 2 });
        assert_eq!(tokens[1].range, 5..8);
    }

    #[test]
    fn test_triple_bang_collapses() {
        assert_eq!(
            kinds("!!!1"),
            vec![
                TokenKind::Text("!".to_string()),
                TokenKind::Priority { level: 1 }
            ]
        );
    }

    #[test]
    fn test_code_spans_stay_text() {
        assert_eq!(
            kinds("a `[[x]] #t` [[y]]"),
            vec![
                TokenKind::Text("a `[[x]] #t` ".to_string()),
                TokenKind::Wikilink {
                    id: "y".to_string(),
                    text: None
                },
            ]
        );
        assert_eq!(kinds("``a ` [[x]]``"), vec![TokenKind::Text("``a ` [[x]]``".to_string())]);
    }

    #[test]
    fn test_unclosed_backticks_are_literal() {
        assert_eq!(
            kinds("`` [[x]] `"),
            vec![
                TokenKind::Text("`` ".to_string()),
                TokenKind::Wikilink {
                    id: "x".to_string(),
                    text: None
                },
                TokenKind::Text(" `".to_string()),
            ]
        );
    }

    #[test]
    fn test_tag_needs_boundary() {
        assert_eq!(kinds("a#b"), vec![TokenKind::Text("a#b".to_string())]);
        assert_eq!(
            kinds("a #b"),
            vec![
                TokenKind::Text("a ".to_string()),
                TokenKind::Tag {
                    name: "b".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_ranges_cover_input() {
        let input = "see [[a|b]] and #c/d !!3 ![[e]] done";
        let tokens = tokenize(input);
        let mut end = 0;
        for token in &tokens {
            assert_eq!(token.range.start, end);
            end = token.range.end;
        }
        assert_eq!(end, input.len());
    }

    #[test]
    fn test_invalid_shapes_preserved() {
        for input in ["[[", "[[]]", "![[", "[[abc", "[[abc|]]", "![[]]", "[[a]", "!!", "!!4", "#"] {
            assert_eq!(kinds(input), vec![TokenKind::Text(input.to_string())], "{input}");
        }
    }
}
