//! Data services for the rendering and legend collaborators.
//!
//! Pure helpers that translate pipeline output into display-ready data:
//! color bands, class breaks, and per-level tallies. The collaborators that
//! put these on screen live outside this crate.

pub mod style;
pub mod summary;

pub use style::{color_for_level, color_for_vc, quantile_stops, VcStyleBand, VC_STYLE};
pub use summary::{network_snapshot, tally_levels, LevelCounts, NetworkSnapshot};
