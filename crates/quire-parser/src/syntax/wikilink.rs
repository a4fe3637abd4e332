//! Wikilink and embed grammar
//!
//! `[[id]]`, `[[id|text]]`, `![[id]]`, `![[id|text]]`. Embeds share the
//! wikilink grammar behind a leading `!`.

use super::{run, Capture, Machine, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Expecting the `!` of an embed
    Bang,
    /// Expecting the first `[`
    Open,
    /// Expecting the second `[`
    Open2,
    /// Expecting the first id character
    IdStart,
    Id,
    /// Saw `]` after the id, expecting the second
    IdClose,
    /// Saw `|`, expecting the first text character
    TextStart,
    Text,
    /// Saw `]` after the text, expecting the second
    TextClose,
}

/// State machine for `[[...]]` (or `![[...]]` when `embed` is set)
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkMachine {
    pub embed: bool,
}

impl LinkMachine {
    pub const WIKILINK: Self = Self { embed: false };
    pub const EMBED: Self = Self { embed: true };
}

/// Characters allowed in a link id
pub fn is_id_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '-' | '_' | '.' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '@' | '{' | '}' | ' '
        )
}

impl Machine for LinkMachine {
    type State = LinkState;

    fn start(&self) -> LinkState {
        if self.embed {
            LinkState::Bang
        } else {
            LinkState::Open
        }
    }

    fn transition(&self, state: LinkState, ch: Option<char>) -> Step<LinkState> {
        use LinkState::*;

        let Some(c) = ch else {
            return Step::Reject;
        };

        match (state, c) {
            (Bang, '!') => Step::Next(Open, Capture::Skip),
            (Open, '[') => Step::Next(Open2, Capture::Skip),
            (Open2, '[') => Step::Next(IdStart, Capture::Skip),
            (IdStart, c) if is_id_char(c) => Step::Next(Id, Capture::Primary),
            (Id, ']') => Step::Next(IdClose, Capture::Skip),
            (Id, '|') => Step::Next(TextStart, Capture::Skip),
            (Id, c) if is_id_char(c) => Step::Next(Id, Capture::Primary),
            (IdClose, ']') | (TextClose, ']') => Step::Accept { consumed: true },
            (TextStart, ']' | '\n') => Step::Reject,
            (TextStart, _) => Step::Next(Text, Capture::Secondary),
            (Text, ']') => Step::Next(TextClose, Capture::Skip),
            (Text, '\n') => Step::Reject,
            (Text, _) => Step::Next(Text, Capture::Secondary),
            _ => Step::Reject,
        }
    }
}

/// A matched wikilink or embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub id: String,
    /// Custom text after `|`, if present
    pub text: Option<String>,
    /// Bytes consumed including brackets
    pub len: usize,
}

fn scan(machine: LinkMachine, input: &str) -> Option<LinkMatch> {
    let matched = run(&machine, input)?;
    Some(LinkMatch {
        id: matched.captures.primary,
        text: matched.captures.secondary,
        len: matched.len,
    })
}

/// Match a wikilink at the start of `input`
pub fn scan_wikilink(input: &str) -> Option<LinkMatch> {
    scan(LinkMachine::WIKILINK, input)
}

/// Match an embed at the start of `input`
pub fn scan_embed(input: &str) -> Option<LinkMatch> {
    scan(LinkMachine::EMBED, input)
}
