//! Priority marker grammar: `!!1`, `!!2`, `!!3`

use super::{run, Capture, Machine, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityState {
    Bang,
    Bang2,
    Level,
    Done,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityMachine;

impl Machine for PriorityMachine {
    type State = PriorityState;

    fn start(&self) -> PriorityState {
        PriorityState::Bang
    }

    fn transition(&self, state: PriorityState, ch: Option<char>) -> Step<PriorityState> {
        match (state, ch) {
            (PriorityState::Bang, Some('!')) => Step::Next(PriorityState::Bang2, Capture::Skip),
            (PriorityState::Bang2, Some('!')) => Step::Next(PriorityState::Level, Capture::Skip),
            (PriorityState::Level, Some('1'..='3')) => Step::Next(PriorityState::Done, Capture::Primary),
            // No lookahead: `!!12` is priority 1 followed by text
            (PriorityState::Done, _) => Step::Accept { consumed: false },
            _ => Step::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMatch {
    pub level: u8,
    pub len: usize,
}

pub fn scan_priority(input: &str) -> Option<PriorityMatch> {
    let matched = run(&PriorityMachine, input)?;
    let level = matched.captures.primary.parse().ok()?;
    Some(PriorityMatch {
        level,
        len: matched.len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("!!1", 1)]
    #[test_case("!!2", 2)]
    #[test_case("!!3 later", 3)]
    #[test_case("!!12", 1)]
    fn test_scan_priority(input: &str, level: u8) {
        assert_eq!(scan_priority(input), Some(PriorityMatch { level, len: 3 }));
    }

    #[test_case("!!" ; "no digit")]
    #[test_case("!!0" ; "zero")]
    #[test_case("!!4" ; "four")]
    #[test_case("!!!1" ; "three bangs")]
    #[test_case("!1" ; "one bang")]
    fn test_scan_priority_rejects(input: &str) {
        assert_eq!(scan_priority(input), None);
    }
}
