//! Join, metrics, and diversion algorithms.
//!
//! This module provides the analytical core of the pipeline: the
//! segment/traffic join, per-hour V/C metrics with congestion ranking, and
//! the proportional closure-diversion model.
//!
//! # Components
//!
//! - [`join`]: merge segment geometry and traffic observations by id
//! - [`metrics`]: capacity, V/C ratio, congestion rank, peak-hour lookup
//! - [`diversion`]: proportional reallocation for closed segments
//!
//! # Example
//!
//! ```
//! use traffic_vc::algorithms::{compute_hour_metrics, join_segments_traffic};
//!
//! let joined = join_segments_traffic(&[], &[]);
//! let metrics = compute_hour_metrics(&joined, 8);
//! assert!(metrics.is_empty());
//! ```

pub mod diversion;
pub mod join;
pub mod metrics;

pub use diversion::{proportionate_diversion, DiversionRecord, DiversionResult};
pub use join::join_segments_traffic;
pub use metrics::{
    capacity, compute_hour_metrics, peak_hour, rank, vc, CongestionLevel, MetricRecord,
    CAPACITY_PER_LANE, RANK_THRESHOLDS,
};
