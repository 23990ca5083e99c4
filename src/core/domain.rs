//! Domain models for road segments and hourly traffic observations.
//!
//! This module provides the core data structures produced by the ingestion
//! pipeline: segment geometry records, normalized traffic observations with
//! their hourly volume series, and the joined records that downstream
//! metrics operate on.
//!
//! Numeric fields that can be absent in the survey data (volumes, lane
//! counts) are modeled as `Option` rather than NaN sentinels; arithmetic
//! over them is defined by the metrics layer.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Original CSV row carried on each record, header name to trimmed value in
/// column order. Kept for audit and debugging only; pipeline logic never
/// reads it.
pub type RawRow = IndexMap<String, String>;

/// Travel direction of a traffic observation.
///
/// Unrecognized non-empty labels are preserved verbatim in
/// [`Direction::Other`] rather than collapsed to [`Direction::Unknown`];
/// survey exports carry free-form direction text and dropping it would lose
/// the distinction between "no value" and "a value we did not recognize".
///
/// # Examples
///
/// ```
/// use traffic_vc::core::domain::Direction;
///
/// assert_eq!(Direction::parse("1"), Direction::Up);
/// assert_eq!(Direction::parse("下り"), Direction::Down);
/// assert_eq!(Direction::parse(""), Direction::Unknown);
/// assert_eq!(Direction::parse("東行"), Direction::Other("東行".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Unknown,
    /// Unrecognized non-empty direction label, carried through verbatim.
    Other(String),
}

impl Direction {
    /// Normalize a raw direction code or label.
    ///
    /// Code `"1"` maps to up and `"2"` to down; otherwise a label
    /// containing `上` maps to up and one containing `下` to down, in that
    /// order of precedence. Empty input is [`Direction::Unknown`].
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s == "1" {
            return Direction::Up;
        }
        if s == "2" {
            return Direction::Down;
        }
        if s.contains('上') {
            return Direction::Up;
        }
        if s.contains('下') {
            return Direction::Down;
        }
        if s.is_empty() {
            Direction::Unknown
        } else {
            Direction::Other(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Unknown => "unknown",
            Direction::Other(label) => label,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Volume observed for one detected hour column of a traffic row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourSample {
    /// Hour slot parsed from the column label, when recognizable. Columns
    /// whose label yields no parseable hour are kept with `None` and sort
    /// after all recognized hours.
    pub hour: Option<u32>,
    /// Observed volume; `None` for empty or unparseable cells.
    pub volume: Option<f64>,
    /// Source column name the value came from.
    pub column: String,
}

/// Geometry row for one road segment.
///
/// All four coordinates are finite by construction: rows failing that are
/// dropped by the segment loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRecord {
    pub segment_id: i64,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    /// Original row, audit only.
    pub raw: RawRow,
}

impl SegmentRecord {
    /// Straight two-point line from the segment start to its end.
    pub fn geometry(&self) -> LineGeometry {
        LineGeometry::new([self.start_x, self.start_y], [self.end_x, self.end_y])
    }
}

/// Normalized hourly traffic observation for one survey row.
///
/// Traffic rows are never dropped for field defects: a row with an
/// unparseable id, direction, or lane count still carries its time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficRecord {
    /// Survey segment id; `None` when the id cell failed integer parsing,
    /// in which case the record can never join a segment.
    pub segment_id: Option<i64>,
    pub direction: Direction,
    pub lanes: Option<u32>,
    /// Hourly series, ordered ascending by detected hour.
    pub hours: Vec<HourSample>,
    /// Daily total over the present hourly volumes.
    pub v24h: f64,
    /// Original row, audit only.
    pub raw: RawRow,
}

/// Two-point line geometry in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineGeometry {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl LineGeometry {
    pub fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self { start, end }
    }

    /// Coordinate pairs in drawing order.
    pub fn coordinates(&self) -> [[f64; 2]; 2] {
        [self.start, self.end]
    }

    /// GeoJSON `LineString` value for map-rendering consumers.
    ///
    /// # Examples
    ///
    /// ```
    /// use traffic_vc::core::domain::LineGeometry;
    ///
    /// let geom = LineGeometry::new([139.70, 35.68], [139.71, 35.69]);
    /// let value = geom.to_geojson();
    /// assert_eq!(value["type"], "LineString");
    /// assert_eq!(value["coordinates"][0][0], 139.70);
    /// ```
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "LineString",
            "coordinates": [self.start, self.end],
        })
    }
}

/// One segment/traffic pair surviving the join.
///
/// Carries the traffic observation's series plus the segment's geometry.
/// Duplicate observations per `segment_id`/`direction` each produce their
/// own record; the join never merges or averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    pub segment_id: i64,
    pub direction: Direction,
    pub lanes: Option<u32>,
    pub hours: Vec<HourSample>,
    pub v24h: f64,
    pub geom: LineGeometry,
    /// Original segment row, audit only.
    pub segment_raw: RawRow,
    /// Original traffic row, audit only.
    pub traffic_raw: RawRow,
}

impl JoinedRecord {
    /// Volume observed at `hour`; `None` when the hour is absent from the
    /// series or its cell was unparseable.
    pub fn volume_at(&self, hour: u32) -> Option<f64> {
        self.hours
            .iter()
            .find(|s| s.hour == Some(hour))
            .and_then(|s| s.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_codes_take_precedence_over_indicator_characters() {
        assert_eq!(Direction::parse("1"), Direction::Up);
        assert_eq!(Direction::parse("2"), Direction::Down);
        assert_eq!(Direction::parse("上り"), Direction::Up);
        assert_eq!(Direction::parse("下り"), Direction::Down);
        // 上 is tested before 下 when both appear
        assert_eq!(Direction::parse("上下"), Direction::Up);
    }

    #[test]
    fn direction_preserves_unrecognized_labels() {
        assert_eq!(
            Direction::parse(" 東行 "),
            Direction::Other("東行".to_string())
        );
        assert_eq!(Direction::parse(""), Direction::Unknown);
        assert_eq!(Direction::parse("   "), Direction::Unknown);
        assert_eq!(Direction::parse("東行").as_str(), "東行");
    }

    #[test]
    fn volume_at_matches_only_recognized_hours() {
        let record = JoinedRecord {
            segment_id: 1,
            direction: Direction::Up,
            lanes: Some(2),
            hours: vec![
                HourSample {
                    hour: Some(7),
                    volume: Some(120.0),
                    column: "７時台".to_string(),
                },
                HourSample {
                    hour: Some(8),
                    volume: None,
                    column: "８時台".to_string(),
                },
                HourSample {
                    hour: None,
                    volume: Some(40.0),
                    column: "合計".to_string(),
                },
            ],
            v24h: 160.0,
            geom: LineGeometry::new([0.0, 0.0], [1.0, 1.0]),
            segment_raw: RawRow::new(),
            traffic_raw: RawRow::new(),
        };

        assert_eq!(record.volume_at(7), Some(120.0));
        // a present hour whose cell was unparseable reads as absent
        assert_eq!(record.volume_at(8), None);
        assert_eq!(record.volume_at(9), None);
    }

    #[test]
    fn geometry_runs_start_to_end() {
        let seg = SegmentRecord {
            segment_id: 10,
            start_x: 139.70,
            start_y: 35.68,
            end_x: 139.71,
            end_y: 35.69,
            raw: RawRow::new(),
        };

        let geom = seg.geometry();
        assert_eq!(geom.coordinates(), [[139.70, 35.68], [139.71, 35.69]]);
    }
}
