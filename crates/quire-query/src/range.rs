//! The range operator used by count, date and priority filters

use std::cmp::Ordering;

use crate::relative::RelativeDates;

/// Comparison prefix of a range condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    /// Split a condition like `>=3` into its comparison and operand
    pub fn split(condition: &str) -> (Self, &str) {
        // Two-character prefixes first
        for (prefix, comparison) in [
            (">=", Self::Ge),
            ("<=", Self::Le),
            (">", Self::Gt),
            ("<", Self::Lt),
        ] {
            if let Some(rest) = condition.strip_prefix(prefix) {
                return (comparison, rest);
            }
        }
        (Self::Eq, condition)
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
        }
    }
}

/// Numeric comparison when both sides are numbers, otherwise lexicographic.
///
/// ISO dates compare correctly either way.
fn compare(value: &str, operand: &str) -> Ordering {
    match (value.trim().parse::<f64>(), operand.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => value.cmp(operand),
    }
}

/// Check `value` against a range condition (`>=x`, `<=x`, `>x`, `<x`, or `x` for equality).
///
/// The operand is passed through the relative date resolver first, so
/// `>=today` compares against today's ISO date.
pub fn is_in_range(value: &str, condition: &str, dates: &RelativeDates) -> bool {
    let (comparison, operand) = Comparison::split(condition);
    let operand = dates.resolve(operand);
    comparison.holds(compare(value, &operand))
}
