//! Turns Notion pages into one checked entry per calendar day.
//!
//! A page contributes when its `Date` property carries a parseable
//! `created_time` and the configured checkbox property is ticked. The
//! creation date is shifted forward by one calendar day before it is
//! reported. Unchecked days are never represented.
//!
//! `created_time` is read as ISO-8601: an RFC 3339 timestamp (converted to its
//! UTC calendar date) or a bare `YYYY-MM-DD` date.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

use crate::models::{DateEntry, Page};

/// Name of the property holding the creation timestamp.
pub const DATE_PROPERTY: &str = "Date";

/// Why a page did not contribute an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingDateProperty,
    MissingCheckboxProperty,
    Unchecked,
    MissingCreatedTime,
    /// Raw `created_time` that failed to parse, as JSON text if not a string
    InvalidDate(String),
    /// Parsed date has no following day
    DateOutOfRange(NaiveDate),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDateProperty => write!(f, "missing {} property", DATE_PROPERTY),
            SkipReason::MissingCheckboxProperty => write!(f, "missing checkbox property"),
            SkipReason::Unchecked => write!(f, "checkbox not checked"),
            SkipReason::MissingCreatedTime => write!(f, "no created_time on {}", DATE_PROPERTY),
            SkipReason::InvalidDate(raw) => write!(f, "invalid date: {}", raw),
            SkipReason::DateOutOfRange(date) => write!(f, "date out of range: {}", date),
        }
    }
}

/// Result of classifying a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The shifted day this page reports
    Admitted(NaiveDate),
    Skipped(SkipReason),
}

/// A page that was left out, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position of the page in the input
    pub index: usize,
    pub page_id: Option<String>,
    pub reason: SkipReason,
}

/// Output of [`aggregate`].
#[derive(Debug, Default)]
pub struct Aggregation {
    pub entries: Vec<DateEntry>,
    pub skipped: Vec<SkippedRecord>,
}

/// Dates seen so far, in first-seen order.
#[derive(Debug, Default)]
pub struct CheckboxMap {
    seen: HashSet<NaiveDate>,
    order: Vec<NaiveDate>,
}

impl CheckboxMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `date` as checked. Returns false if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        if !self.seen.insert(date) {
            return false;
        }
        self.order.push(date);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_entries(self) -> Vec<DateEntry> {
        self.order
            .into_iter()
            .map(|date| DateEntry {
                date: date.format("%Y-%m-%d").to_string(),
                is_checked: true,
            })
            .collect()
    }
}

/// Parse a `created_time` value into a UTC calendar date.
pub fn parse_created_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Decide whether `page` contributes, and with which day.
pub fn classify(page: &Page, checkbox_property: &str) -> RecordOutcome {
    let Some(date_property) = page.properties.get(DATE_PROPERTY) else {
        return RecordOutcome::Skipped(SkipReason::MissingDateProperty);
    };
    let Some(checkbox) = page.properties.get(checkbox_property) else {
        return RecordOutcome::Skipped(SkipReason::MissingCheckboxProperty);
    };
    if checkbox.checkbox != Some(Value::Bool(true)) {
        return RecordOutcome::Skipped(SkipReason::Unchecked);
    }

    let raw = match &date_property.created_time {
        None => return RecordOutcome::Skipped(SkipReason::MissingCreatedTime),
        Some(Value::String(raw)) => raw,
        Some(other) => return RecordOutcome::Skipped(SkipReason::InvalidDate(other.to_string())),
    };
    let Some(created) = parse_created_date(raw) else {
        return RecordOutcome::Skipped(SkipReason::InvalidDate(raw.clone()));
    };

    match next_day(created) {
        Ok(day) => RecordOutcome::Admitted(day),
        Err(reason) => RecordOutcome::Skipped(reason),
    }
}

/// The calendar day after `created`.
pub fn next_day(created: NaiveDate) -> Result<NaiveDate, SkipReason> {
    created
        .succ_opt()
        .ok_or(SkipReason::DateOutOfRange(created))
}

/// Collapse `pages` into one entry per shifted day.
pub fn aggregate(pages: &[Page], checkbox_property: &str) -> Aggregation {
    let mut map = CheckboxMap::new();
    let mut skipped = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        match classify(page, checkbox_property) {
            RecordOutcome::Admitted(date) => {
                map.insert(date);
            }
            RecordOutcome::Skipped(reason) => {
                match &reason {
                    SkipReason::InvalidDate(raw) => {
                        warn!(page_id = ?page.id, "Invalid date: {}", raw)
                    }
                    other => debug!(page_id = ?page.id, "Skipping record {}: {}", index, other),
                }
                skipped.push(SkippedRecord {
                    index,
                    page_id: page.id.clone(),
                    reason,
                });
            }
        }
    }

    Aggregation {
        entries: map.into_entries(),
        skipped,
    }
}
