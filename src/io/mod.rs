//! Loaders for the survey CSV inputs.
//!
//! Combines the CSV parser and hour-column detection with row validation
//! and normalization, producing the typed records the join and metrics
//! layers consume.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use traffic_vc::config::SchemaConfig;
//! use traffic_vc::io::loaders::SegmentLoader;
//!
//! let config = SchemaConfig::default();
//! let segments = SegmentLoader::load_from_file(Path::new("data/segments.csv"), &config)
//!     .expect("Failed to load segments");
//! println!("Loaded {} segments", segments.len());
//! ```

pub mod loaders;


pub use loaders::{SegmentLoader, TrafficLoader};
