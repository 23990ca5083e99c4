//! Hour-column detection for traffic survey headers.
//!
//! Survey exports carry one volume column per hour slot, labeled with a
//! volume-by-hour marker phrase plus the slot hour, e.g.
//! `時間帯別自動車類交通量（台／時）／８時台`. The hour may be written in
//! half-width or full-width numerals. Detection is rule-based so schema
//! variants can be added without touching the row-parsing logic: a rule
//! decides whether a header is an hour column and how to extract its hour.

use crate::config::TrafficColumns;

/// A detected hour column of the traffic CSV header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourColumn {
    /// Full header name, used to read the cell from each row.
    pub name: String,
    /// Hour slot parsed from the label; `None` when the label carries the
    /// markers but no parseable hour. Such columns are kept and sort after
    /// all recognized hours.
    pub hour: Option<u32>,
}

/// Decides whether a header names an hour column, and extracts its hour.
pub trait HourColumnRule {
    fn matches(&self, header: &str) -> bool;
    fn extract_hour(&self, header: &str) -> Option<u32>;
}

/// Marker-phrase rule: a header is an hour column when it contains both the
/// volume-by-hour marker and the hour-slot marker, and does not contain the
/// exclusion marker (which tags derived-ratio columns).
#[derive(Debug, Clone)]
pub struct MarkerRule {
    volume_marker: String,
    slot_marker: String,
    exclude_marker: String,
}

impl MarkerRule {
    pub fn new(volume_marker: &str, slot_marker: &str, exclude_marker: &str) -> Self {
        Self {
            volume_marker: volume_marker.to_string(),
            slot_marker: slot_marker.to_string(),
            exclude_marker: exclude_marker.to_string(),
        }
    }

    pub fn from_config(columns: &TrafficColumns) -> Self {
        Self::new(
            &columns.hourly_volume_marker,
            &columns.hour_slot_marker,
            &columns.exclude_marker,
        )
    }
}

impl HourColumnRule for MarkerRule {
    fn matches(&self, header: &str) -> bool {
        header.contains(&self.volume_marker)
            && header.contains(&self.slot_marker)
            && !header.contains(&self.exclude_marker)
    }

    /// The hour is the run of digits immediately preceding the slot marker,
    /// in half-width or full-width numerals.
    fn extract_hour(&self, header: &str) -> Option<u32> {
        let marker_at = header.find(&self.slot_marker)?;
        let prefix = &header[..marker_at];

        let mut digits: Vec<u32> = prefix
            .chars()
            .rev()
            .map_while(digit_value)
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.reverse();

        // a digit run too long for u32 is no hour either
        digits
            .into_iter()
            .try_fold(0u32, |acc, d| acc.checked_mul(10)?.checked_add(d))
    }
}

/// Numeric value of a half-width or full-width decimal digit.
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}

/// Scan header names for hour columns and order them ascending by hour.
///
/// The sort is stable; columns whose label yields no parseable hour keep
/// their relative order after all recognized hours. Interleaved unrelated
/// columns do not affect detection.
pub fn detect_hour_columns<R: HourColumnRule>(headers: &[String], rule: &R) -> Vec<HourColumn> {
    let mut columns: Vec<HourColumn> = headers
        .iter()
        .filter(|h| rule.matches(h))
        .map(|h| HourColumn {
            name: h.clone(),
            hour: rule.extract_hour(h),
        })
        .collect();

    columns.sort_by_key(|c| c.hour.map_or(u32::MAX, |h| h));
    columns
}
