//! Display rules for V/C classification.
//!
//! Pure data contracts for the rendering and legend collaborators: the
//! color band per congestion level and automatic class breaks for raw
//! volume styling. No map-library or DOM code belongs here.

use crate::algorithms::metrics::{rank, CongestionLevel, RANK_THRESHOLDS};

/// One legend band: the congestion level it represents, its upper V/C
/// bound, and its display attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VcStyleBand {
    pub level: CongestionLevel,
    pub max: f64,
    pub label: &'static str,
    pub color: &'static str,
}

/// Legend bands in ascending V/C order, aligned with the rank thresholds.
pub const VC_STYLE: [VcStyleBand; 4] = [
    VcStyleBand {
        level: CongestionLevel::Loose,
        max: RANK_THRESHOLDS.loose,
        label: "loose (<0.70)",
        color: "#4caf50",
    },
    VcStyleBand {
        level: CongestionLevel::Congested,
        max: RANK_THRESHOLDS.congested,
        label: "congested (0.70-0.90)",
        color: "#ffc107",
    },
    VcStyleBand {
        level: CongestionLevel::Saturated,
        max: RANK_THRESHOLDS.saturated,
        label: "saturated (0.90-1.00)",
        color: "#ff9800",
    },
    VcStyleBand {
        level: CongestionLevel::OverCapacity,
        max: f64::INFINITY,
        label: "over-capacity (>1.00)",
        color: "#f44336",
    },
];

/// Color for records that cannot be classified.
pub const UNCLASSIFIED_COLOR: &str = "#9e9e9e";

/// Display color for a congestion level.
pub fn color_for_level(level: CongestionLevel) -> &'static str {
    VC_STYLE
        .iter()
        .find(|band| band.level == level)
        .map_or(UNCLASSIFIED_COLOR, |band| band.color)
}

/// Display color for a V/C ratio, classified through [`rank`] so colors can
/// never disagree with the legend counting.
pub fn color_for_vc(ratio: Option<f64>) -> &'static str {
    color_for_level(rank(ratio))
}

/// Interior quantile cut points for automatic volume classing.
///
/// Returns `classes - 1` stops over the present values; callers build the
/// class labels. Empty when no value is finite.
pub fn quantile_stops(values: &[f64], classes: usize) -> Vec<f64> {
    let mut xs: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if xs.is_empty() {
        return Vec::new();
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut stops = Vec::new();
    for i in 1..classes {
        let p = i as f64 / classes as f64;
        let idx = (p * (xs.len() - 1) as f64).floor() as usize;
        stops.push(xs[idx]);
    }
    stops
}
