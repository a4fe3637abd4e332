//! Relative date phrases
//!
//! Filter values such as `date:>=today` or `date:next+week` are resolved to
//! `YYYY-MM-DD` before comparison. Resolution goes through a
//! [`DatePhraseResolver`]; values it does not recognize are compared as-is.

use std::sync::Arc;

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use quire_core::dates;

/// Turns a short phrase into a calendar date
pub trait DatePhraseResolver: Send + Sync {
    /// Resolve `phrase` relative to `today`. `phrase` is lowercase, trimmed and
    /// has `+` already replaced by spaces.
    fn resolve(&self, phrase: &str, today: NaiveDate) -> Option<NaiveDate>;
}

/// Resolver for a small fixed vocabulary:
///
/// - `today`, `tomorrow`, `yesterday`
/// - `next week|month|year`, `last week|month|year`
/// - `in N days|weeks|months`, `N days|weeks|months ago`
/// - weekday names (next occurrence, today included), `next <weekday>` (strictly after today)
/// - ISO `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDatePhrases;

#[derive(Debug, Clone, Copy)]
enum Unit {
    Day,
    Week,
    Month,
    Year,
}

fn unit(word: &str) -> Option<Unit> {
    match word.trim_end_matches('s') {
        "day" => Some(Unit::Day),
        "week" => Some(Unit::Week),
        "month" => Some(Unit::Month),
        "year" => Some(Unit::Year),
        _ => None,
    }
}

fn weekday(word: &str) -> Option<Weekday> {
    match word {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn shift(today: NaiveDate, amount: i64, unit: Unit) -> Option<NaiveDate> {
    let magnitude = amount.unsigned_abs();
    match unit {
        Unit::Day | Unit::Week => {
            let days = Days::new(if matches!(unit, Unit::Week) { magnitude * 7 } else { magnitude });
            if amount >= 0 {
                today.checked_add_days(days)
            } else {
                today.checked_sub_days(days)
            }
        }
        Unit::Month | Unit::Year => {
            let months = if matches!(unit, Unit::Year) { magnitude * 12 } else { magnitude };
            let months = Months::new(u32::try_from(months).ok()?);
            if amount >= 0 {
                today.checked_add_months(months)
            } else {
                today.checked_sub_months(months)
            }
        }
    }
}

/// Days until the next `target`, `0` if today already is one
fn days_until(today: NaiveDate, target: Weekday) -> u64 {
    let from = today.weekday().num_days_from_monday();
    let to = target.num_days_from_monday();
    u64::from((to + 7 - from) % 7)
}

impl DatePhraseResolver for BasicDatePhrases {
    fn resolve(&self, phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
        if let Some(date) = dates::parse_date(phrase) {
            return Some(date);
        }

        let words: Vec<&str> = phrase.split_whitespace().collect();
        match words.as_slice() {
            ["today"] | ["now"] => Some(today),
            ["tomorrow"] => today.succ_opt(),
            ["yesterday"] => today.pred_opt(),
            ["next", word] => match weekday(word) {
                Some(day) => {
                    let ahead = match days_until(today, day) {
                        0 => 7,
                        n => n,
                    };
                    today.checked_add_days(Days::new(ahead))
                }
                None => shift(today, 1, unit(word)?),
            },
            ["last", word] => shift(today, -1, unit(word)?),
            ["in", count, word] => shift(today, count.parse().ok()?, unit(word)?),
            [count, word, "ago"] => shift(today, -count.parse::<i64>().ok()?, unit(word)?),
            [word] => {
                let day = weekday(word)?;
                today.checked_add_days(Days::new(days_until(today, day)))
            }
            _ => None,
        }
    }
}

/// A resolver bound to a fixed "today"
#[derive(Clone)]
pub struct RelativeDates {
    resolver: Arc<dyn DatePhraseResolver>,
    today: NaiveDate,
}

impl Default for RelativeDates {
    fn default() -> Self {
        Self::new(Arc::new(BasicDatePhrases), Local::now().date_naive())
    }
}

impl std::fmt::Debug for RelativeDates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelativeDates").field("today", &self.today).finish()
    }
}

impl RelativeDates {
    pub fn new(resolver: Arc<dyn DatePhraseResolver>, today: NaiveDate) -> Self {
        Self { resolver, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve `value` to `YYYY-MM-DD`, or return it unchanged
    pub fn resolve(&self, value: &str) -> String {
        let phrase = value.replace('+', " ").trim().to_lowercase();
        if phrase.is_empty() {
            return value.to_string();
        }
        match self.resolver.resolve(&phrase, self.today) {
            Some(date) => dates::format_date(date),
            None => value.to_string(),
        }
    }
}
