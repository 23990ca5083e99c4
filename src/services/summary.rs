//! Dataset-level summaries for legend and dashboard collaborators.

use serde::Serialize;

use crate::algorithms::metrics::{CongestionLevel, MetricRecord};

/// Record count per congestion level, consumed by the legend collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub loose: usize,
    pub congested: usize,
    pub saturated: usize,
    pub over_capacity: usize,
    pub unknown: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.loose + self.congested + self.saturated + self.over_capacity + self.unknown
    }

    /// Records that received a concrete rank.
    pub fn classified(&self) -> usize {
        self.total() - self.unknown
    }

    pub fn get(&self, level: CongestionLevel) -> usize {
        match level {
            CongestionLevel::Loose => self.loose,
            CongestionLevel::Congested => self.congested,
            CongestionLevel::Saturated => self.saturated,
            CongestionLevel::OverCapacity => self.over_capacity,
            CongestionLevel::Unknown => self.unknown,
        }
    }

    fn bump(&mut self, level: CongestionLevel) {
        match level {
            CongestionLevel::Loose => self.loose += 1,
            CongestionLevel::Congested => self.congested += 1,
            CongestionLevel::Saturated => self.saturated += 1,
            CongestionLevel::OverCapacity => self.over_capacity += 1,
            CongestionLevel::Unknown => self.unknown += 1,
        }
    }
}

/// Tally records per congestion level.
pub fn tally_levels(records: &[MetricRecord]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for record in records {
        counts.bump(record.level);
    }
    counts
}

/// Dataset-level summary for one computed hour.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSnapshot {
    pub total_records: usize,
    pub classified_count: usize,
    pub unknown_count: usize,
    /// Mean over present V/C ratios; 0 when none is present.
    pub mean_vc: f64,
    /// Maximum over present V/C ratios; 0 when none is present.
    pub max_vc: f64,
    /// Sum of present hourly volumes.
    pub total_volume: f64,
    pub level_counts: LevelCounts,
}

/// Aggregate one hour's metric records into a snapshot.
pub fn network_snapshot(records: &[MetricRecord]) -> NetworkSnapshot {
    let level_counts = tally_levels(records);

    let ratios: Vec<f64> = records.iter().filter_map(|r| r.vc_ratio).collect();
    let mean_vc = if ratios.is_empty() {
        0.0
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    };
    let max_vc = ratios.iter().copied().fold(0.0, f64::max);

    let total_volume: f64 = records.iter().filter_map(|r| r.volume).sum();

    NetworkSnapshot {
        total_records: records.len(),
        classified_count: level_counts.classified(),
        unknown_count: level_counts.unknown,
        mean_vc,
        max_vc,
        total_volume,
        level_counts,
    }
}
