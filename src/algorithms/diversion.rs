//! Proportional reallocation of volume from closed segments.
//!
//! A declared approximation, not a traffic-assignment model: volume lost on
//! closed segments is spread over every remaining segment in proportion to
//! a static weight (`lanes x v24h`), ignoring geometry and adjacency.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::algorithms::metrics::{
    compute_hour_metrics, rank, vc, CongestionLevel, MetricRecord,
};
use crate::core::domain::JoinedRecord;

/// A metric record extended with its post-closure volume and rating.
#[derive(Debug, Clone, Serialize)]
pub struct DiversionRecord {
    #[serde(flatten)]
    pub metric: MetricRecord,
    /// Volume after reallocation. Always concrete: closed segments carry 0,
    /// receiving segments carry their (absent-as-zero) volume plus share.
    pub volume_prime: f64,
    /// V/C ratio after reallocation; closed segments rate as `Some(0.0)`.
    pub vc_prime: Option<f64>,
    pub level_prime: CongestionLevel,
}

impl DiversionRecord {
    pub fn segment_id(&self) -> i64 {
        self.metric.segment_id()
    }
}

/// Outcome of one closure scenario.
#[derive(Debug, Clone, Serialize)]
pub struct DiversionResult {
    pub hour: u32,
    /// Closed segment ids, deduplicated and sorted.
    pub closed_ids: Vec<i64>,
    /// Total volume lost from closed segments at the hour, absent volumes
    /// contributing zero.
    pub total_delta: f64,
    /// One record per input record, in input order.
    pub records: Vec<DiversionRecord>,
}

/// Redistribute the volume of closed segments across the remaining ones,
/// proportionally to each receiver's `lanes x v24h` weight.
///
/// `_hop` is reserved for a future neighbor-radius extension and does not
/// affect the output.
///
/// Edge cases: with no closed ids every record still gets its volume
/// coerced to a concrete `volume_prime` (absent as zero); when all records
/// are closed the candidate weight sum is zero and the lost volume is
/// dropped rather than reported as an error.
pub fn proportionate_diversion(
    records: &[JoinedRecord],
    closed_ids: &[i64],
    hour: u32,
    _hop: u32,
) -> DiversionResult {
    let closed: BTreeSet<i64> = closed_ids.iter().copied().collect();
    let base = compute_hour_metrics(records, hour);

    let total_delta: f64 = base
        .iter()
        .filter(|m| closed.contains(&m.segment_id()))
        .filter_map(|m| m.volume)
        .sum();

    let total_weight: f64 = base
        .iter()
        .filter(|m| !closed.contains(&m.segment_id()))
        .map(receiver_weight)
        .sum();

    let records = base
        .into_iter()
        .map(|metric| {
            if closed.contains(&metric.segment_id()) {
                DiversionRecord {
                    metric,
                    volume_prime: 0.0,
                    vc_prime: Some(0.0),
                    level_prime: rank(Some(0.0)),
                }
            } else {
                let share = if total_weight > 0.0 {
                    total_delta * receiver_weight(&metric) / total_weight
                } else {
                    0.0
                };
                let volume_prime = metric.volume.unwrap_or(0.0) + share;
                let vc_prime = vc(Some(volume_prime), metric.capacity);
                DiversionRecord {
                    level_prime: rank(vc_prime),
                    volume_prime,
                    vc_prime,
                    metric,
                }
            }
        })
        .collect();

    DiversionResult {
        hour,
        closed_ids: closed.into_iter().collect(),
        total_delta,
        records,
    }
}

/// Receiving weight of a candidate segment: `lanes x v24h`, zero when the
/// lane count is absent.
fn receiver_weight(metric: &MetricRecord) -> f64 {
    let lanes = metric.record.lanes.map_or(0.0, f64::from);
    lanes * metric.record.v24h
}
