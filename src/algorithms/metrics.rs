//! Capacity, V/C ratio, and congestion-rank computation.
//!
//! All helpers define explicit behavior for absent inputs: an absent
//! operand propagates to an absent result, and an absent ratio classifies
//! as [`CongestionLevel::Unknown`]. Nothing here mutates its inputs; every
//! call allocates fresh output records.

use serde::Serialize;
use std::fmt;

use crate::core::domain::{HourSample, JoinedRecord};

/// Hourly throughput of a single lane, vehicles per hour.
pub const CAPACITY_PER_LANE: f64 = 1800.0;

/// Upper V/C bounds of the congestion ranks, inclusive on the lower side
/// of each band. Defined centrally so classification, styling, and legend
/// counting stay aligned.
pub const RANK_THRESHOLDS: RankThresholds = RankThresholds {
    loose: 0.70,
    congested: 0.90,
    saturated: 1.00,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankThresholds {
    pub loose: f64,
    pub congested: f64,
    pub saturated: f64,
}

/// Discrete congestion category derived from a V/C ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CongestionLevel {
    Loose,
    Congested,
    Saturated,
    OverCapacity,
    Unknown,
}

impl CongestionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongestionLevel::Loose => "loose",
            CongestionLevel::Congested => "congested",
            CongestionLevel::Saturated => "saturated",
            CongestionLevel::OverCapacity => "over-capacity",
            CongestionLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hourly capacity for a lane count.
///
/// # Examples
///
/// ```
/// use traffic_vc::algorithms::metrics::capacity;
///
/// assert_eq!(capacity(Some(2)), Some(3600.0));
/// assert_eq!(capacity(Some(0)), Some(0.0));
/// assert_eq!(capacity(None), None);
/// ```
pub fn capacity(lanes: Option<u32>) -> Option<f64> {
    lanes.map(|n| f64::from(n) * CAPACITY_PER_LANE)
}

/// Volume-to-capacity ratio; absent unless both operands are present and
/// finite and the capacity is positive.
///
/// # Examples
///
/// ```
/// use traffic_vc::algorithms::metrics::vc;
///
/// assert_eq!(vc(Some(1260.0), Some(1800.0)), Some(0.7));
/// assert_eq!(vc(Some(90.0), Some(0.0)), None);
/// assert_eq!(vc(None, Some(1800.0)), None);
/// ```
pub fn vc(volume: Option<f64>, cap: Option<f64>) -> Option<f64> {
    match (volume, cap) {
        (Some(v), Some(c)) if v.is_finite() && c.is_finite() && c > 0.0 => Some(v / c),
        _ => None,
    }
}

/// Classify a V/C ratio into a congestion rank.
///
/// Bands are inclusive on their lower bound: a ratio of exactly 0.70 is
/// already congested, exactly 1.00 still saturated.
pub fn rank(ratio: Option<f64>) -> CongestionLevel {
    let Some(r) = ratio.filter(|r| r.is_finite()) else {
        return CongestionLevel::Unknown;
    };

    if r < RANK_THRESHOLDS.loose {
        CongestionLevel::Loose
    } else if r < RANK_THRESHOLDS.congested {
        CongestionLevel::Congested
    } else if r <= RANK_THRESHOLDS.saturated {
        CongestionLevel::Saturated
    } else {
        CongestionLevel::OverCapacity
    }
}

/// A joined record enriched with the metrics of one queried hour.
#[derive(Debug, Clone, Serialize)]
pub struct MetricRecord {
    #[serde(flatten)]
    pub record: JoinedRecord,
    /// The queried hour.
    pub hour: u32,
    /// Volume at the queried hour.
    pub volume: Option<f64>,
    /// Hourly capacity from the lane count.
    pub capacity: Option<f64>,
    /// Volume-to-capacity ratio.
    pub vc_ratio: Option<f64>,
    pub level: CongestionLevel,
}

impl MetricRecord {
    /// Id the rendering layer keys its style lookup on.
    pub fn segment_id(&self) -> i64 {
        self.record.segment_id
    }
}

/// Compute per-record metrics for one hour.
///
/// Pure: input records are cloned into the output, never mutated. A record
/// whose series does not carry the hour yields an absent volume and an
/// unknown rank.
pub fn compute_hour_metrics(records: &[JoinedRecord], hour: u32) -> Vec<MetricRecord> {
    records
        .iter()
        .map(|rec| {
            let volume = rec.volume_at(hour);
            let cap = capacity(rec.lanes);
            let ratio = vc(volume, cap);
            MetricRecord {
                record: rec.clone(),
                hour,
                volume,
                capacity: cap,
                vc_ratio: ratio,
                level: rank(ratio),
            }
        })
        .collect()
}

/// The hour sample with the highest present volume, first maximum winning
/// ties in series order. `None` when the series is empty or carries no
/// present volume.
pub fn peak_hour(record: &JoinedRecord) -> Option<&HourSample> {
    let mut best: Option<&HourSample> = None;
    let mut best_volume = f64::NEG_INFINITY;

    for sample in &record.hours {
        if let Some(v) = sample.volume {
            if v > best_volume {
                best_volume = v;
                best = Some(sample);
            }
        }
    }
    best
}
