//! Core domain models for the traffic pipeline.
//!
//! This module defines the fundamental data structures flowing through the
//! system: segment geometry, normalized traffic observations, and joined
//! records.

pub mod domain;
