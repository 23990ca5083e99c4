//! Traffic V/C pipeline: survey CSV ingestion, segment/traffic join,
//! volume-to-capacity metrics, and closure-diversion modelling.
//!
//! The crate exposes plain data-in/data-out functions; map rendering,
//! legend DOM, and fetch glue are external collaborators. A typical
//! pipeline run:
//!
//! ```no_run
//! use std::path::Path;
//! use traffic_vc::algorithms::{compute_hour_metrics, join_segments_traffic};
//! use traffic_vc::config::SchemaConfig;
//! use traffic_vc::io::{SegmentLoader, TrafficLoader};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SchemaConfig::default();
//! let segments = SegmentLoader::load_from_file(Path::new("data/segments.csv"), &config)?;
//! let traffic = TrafficLoader::load_from_file(Path::new("data/traffic.csv"), &config)?;
//!
//! let joined = join_segments_traffic(&segments, &traffic);
//! let metrics = compute_hour_metrics(&joined, 8);
//! println!("{} records at 08:00", metrics.len());
//! # Ok(())
//! # }
//! ```
//!
//! Every call recomputes fresh output from its inputs; there is no shared
//! or ambient state, so independent call sites need no coordination.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod services;
