// src/view/filter.rs
//! Type, size, date and text predicates over the listed entries.

use std::time::SystemTime;

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use thiserror::Error;

use super::ViewState;
use crate::fs::Entry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("expected `min..max`, got '{0}'")]
    MissingSeparator(String),
    #[error("'{0}' is not a size (try 512, 4K, 2M, 1G)")]
    BadSize(String),
    #[error("'{0}' is not a date (use YYYY-MM-DD)")]
    BadDate(String),
    #[error("range start is after its end")]
    Inverted,
}

/// Inclusive byte-size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 0, max: u64::MAX }
    }
}

impl SizeRange {
    pub fn contains(&self, size: u64) -> bool {
        (self.min..=self.max).contains(&size)
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    /// Parse `min..max`; either side may be blank. Suffixes K, M, G are powers of 1024.
    pub fn parse(input: &str) -> Result<Self, RangeParseError> {
        let (lo, hi) = split_range(input)?;
        let range = Self {
            min: lo.map(parse_size).transpose()?.unwrap_or(0),
            max: hi.map(parse_size).transpose()?.unwrap_or(u64::MAX),
        };
        if range.min > range.max {
            return Err(RangeParseError::Inverted);
        }
        Ok(range)
    }
}

/// Inclusive modification-time bounds; `None` leaves a side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<SystemTime>,
    pub to: Option<SystemTime>,
}

impl DateRange {
    pub fn contains(&self, instant: SystemTime) -> bool {
        self.from.is_none_or(|from| instant >= from) && self.to.is_none_or(|to| instant <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD` in local time; the end day is included whole.
    pub fn parse(input: &str) -> Result<Self, RangeParseError> {
        let (lo, hi) = split_range(input)?;
        let from = lo
            .map(|s| parse_day(s, NaiveTime::MIN))
            .transpose()?;
        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or(NaiveTime::MIN);
        let to = hi.map(|s| parse_day(s, end_of_day)).transpose()?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(RangeParseError::Inverted);
            }
        }
        Ok(Self { from, to })
    }
}

fn split_range<'a>(input: &'a str) -> Result<(Option<&'a str>, Option<&'a str>), RangeParseError> {
    let (lo, hi) = input
        .split_once("..")
        .ok_or_else(|| RangeParseError::MissingSeparator(input.to_string()))?;
    let side = |s: &'a str| {
        let s = s.trim();
        (!s.is_empty()).then_some(s)
    };
    Ok((side(lo), side(hi)))
}

fn parse_size(raw: &str) -> Result<u64, RangeParseError> {
    let bad = || RangeParseError::BadSize(raw.to_string());
    let upper = raw.to_ascii_uppercase();
    let digits = upper.trim_end_matches('B');
    let (number, shift) = match digits.chars().last() {
        Some('K') => (&digits[..digits.len() - 1], 10),
        Some('M') => (&digits[..digits.len() - 1], 20),
        Some('G') => (&digits[..digits.len() - 1], 30),
        _ => (digits, 0),
    };
    let value: u64 = number.trim().parse().map_err(|_| bad())?;
    value.checked_mul(1u64 << shift).ok_or_else(bad)
}

fn parse_day(raw: &str, time: NaiveTime) -> Result<SystemTime, RangeParseError> {
    let bad = || RangeParseError::BadDate(raw.to_string());
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| bad())?;
    let local = Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(bad)?;
    Ok(SystemTime::from(local))
}

/// Whether `entry` passes every active predicate of `state`.
pub fn matches(entry: &Entry, state: &ViewState) -> bool {
    if !matches_search(entry.name(), &state.search_text) {
        return false;
    }
    if entry.is_dir() {
        return true;
    }
    if let Some(wanted) = state.type_filter {
        if entry.category != Some(wanted) {
            return false;
        }
    }
    match &entry.snapshot {
        Some(snap) => {
            state.size_range.contains(snap.byte_size) && state.date_range.contains(snap.last_modified)
        }
        None => state.size_range.is_unbounded() && state.date_range.is_unbounded(),
    }
}

fn matches_search(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep the entries that pass the filters, in their original order.
pub fn filter_entries<'a>(entries: &'a [Entry], state: &ViewState) -> Vec<&'a Entry> {
    entries.iter().filter(|e| matches(e, state)).collect()
}
