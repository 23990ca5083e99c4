//! Loaders turning survey CSV text into typed records.
//!
//! Two inputs feed the pipeline: a segment geometry CSV and a traffic
//! survey CSV. The loaders parse, validate, and normalize rows according to
//! a [`SchemaConfig`]. Error handling follows the pipeline's taxonomy:
//! only an unreadable file is an error; malformed segment rows are dropped,
//! malformed traffic fields degrade to `None`, and both are logged at debug
//! level.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::config::{SchemaConfig, SegmentColumns, TrafficColumns};
use crate::core::domain::{Direction, HourSample, RawRow, SegmentRecord, TrafficRecord};
use crate::parsing::csv_parser::parse_csv_with_separator;
use crate::parsing::hour_columns::{detect_hour_columns, HourColumn, MarkerRule};

/// Loader for the segment geometry CSV.
pub struct SegmentLoader;

impl SegmentLoader {
    /// Load segment records from a CSV file.
    ///
    /// The only error path is an unreadable file; malformed rows are
    /// dropped, not reported.
    pub fn load_from_file(path: &Path, config: &SchemaConfig) -> Result<Vec<SegmentRecord>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read segment CSV {}", path.display()))?;

        Ok(Self::load_from_str(&text, config))
    }

    /// Load segment records from CSV text.
    ///
    /// Rows whose id or any of the four coordinates fail to parse as a
    /// finite number are dropped. Duplicate ids are allowed here; the join
    /// index applies last-seen-wins.
    pub fn load_from_str(text: &str, config: &SchemaConfig) -> Vec<SegmentRecord> {
        let rows = parse_csv_with_separator(text, config.separator);
        let total = rows.len();

        let records: Vec<SegmentRecord> = rows
            .into_iter()
            .filter_map(|row| Self::normalize_row(row, &config.segment))
            .collect();

        if records.len() < total {
            debug!(
                "dropped {} of {} segment rows with unparseable id or coordinates",
                total - records.len(),
                total
            );
        }
        records
    }

    fn normalize_row(row: RawRow, columns: &SegmentColumns) -> Option<SegmentRecord> {
        let segment_id = parse_int(field(&row, &columns.segment_id))?;
        let start_x = parse_coordinate(field(&row, &columns.start_x))?;
        let start_y = parse_coordinate(field(&row, &columns.start_y))?;
        let end_x = parse_coordinate(field(&row, &columns.end_x))?;
        let end_y = parse_coordinate(field(&row, &columns.end_y))?;

        Some(SegmentRecord {
            segment_id,
            start_x,
            start_y,
            end_x,
            end_y,
            raw: row,
        })
    }
}

/// Loader for the traffic survey CSV.
pub struct TrafficLoader;

impl TrafficLoader {
    /// Load traffic records from a CSV file.
    pub fn load_from_file(path: &Path, config: &SchemaConfig) -> Result<Vec<TrafficRecord>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read traffic CSV {}", path.display()))?;

        Ok(Self::load_from_str(&text, config))
    }

    /// Load traffic records from CSV text.
    ///
    /// Hour columns are detected once from the header of the first row and
    /// applied to every row. Rows are never dropped: defective fields
    /// degrade to `None` so an otherwise valid time series survives.
    pub fn load_from_str(text: &str, config: &SchemaConfig) -> Vec<TrafficRecord> {
        let rows = parse_csv_with_separator(text, config.separator);

        let headers: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        let rule = MarkerRule::from_config(&config.traffic);
        let hour_columns = detect_hour_columns(&headers, &rule);

        if hour_columns.is_empty() && !rows.is_empty() {
            warn!("no hour columns detected in traffic CSV header");
        }

        rows.into_iter()
            .map(|row| Self::normalize_row(row, &hour_columns, &config.traffic))
            .collect()
    }

    fn normalize_row(
        row: RawRow,
        hour_columns: &[HourColumn],
        columns: &TrafficColumns,
    ) -> TrafficRecord {
        let segment_id = parse_int(field(&row, &columns.segment_id));
        let direction = Direction::parse(field(&row, &columns.direction));

        // first candidate lane column with a non-empty value wins
        let lanes = columns
            .lanes
            .iter()
            .map(|name| field(&row, name))
            .find(|value| !value.is_empty())
            .and_then(parse_int)
            .and_then(|n| u32::try_from(n).ok());

        let hours: Vec<HourSample> = hour_columns
            .iter()
            .map(|col| HourSample {
                hour: col.hour,
                volume: parse_volume(field(&row, &col.name)),
                column: col.name.clone(),
            })
            .collect();

        let v24h: f64 = hours.iter().filter_map(|s| s.volume).sum();

        TrafficRecord {
            segment_id,
            direction,
            lanes,
            hours,
            v24h,
            raw: row,
        }
    }
}

fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map_or("", String::as_str)
}

/// Lenient integer parse: strips every character that is not an ASCII digit
/// or minus sign, then reads the longest valid leading prefix.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let (sign, rest) = match filtered.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, filtered.as_str()),
    };

    let digit_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digit_end];
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Strict coordinate parse: the whole (trimmed) value must be a finite
/// float, no separator stripping.
pub(crate) fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Volume parse: empty cells are absent, thousands separators are
/// stripped, anything non-finite is absent.
pub(crate) fn parse_volume(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
