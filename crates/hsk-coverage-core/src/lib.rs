//! Core library for hsk-coverage.
//!
//! Computes how well a learner's tracked vocabulary covers the HSK word list
//! and, by a Zipfian estimate, running Chinese text.
//!
//! # Modules
//!
//! - [`word`] - Word and tracked-set types
//! - [`stats`] - Frequency-bucket statistics
//! - [`coverage`] - Cumulative text-coverage curves
//! - [`zipf`] - Harmonic numbers and the weighted rank index
//! - [`vocab`] - Loading word lists and tracked sets
//! - [`export`] - Flashcard export planning
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use hsk_coverage_core::{TrackedSet, Word, compute_coverage_curve, compute_frequency_stats};
//!
//! let words = vec![
//!     Word::new("的", Some(1), Some(1)),
//!     Word::new("爱", Some(1), Some(261)),
//! ];
//! let tracked: TrackedSet = ["的"].into_iter().collect();
//!
//! let stats = compute_frequency_stats(&words, &tracked, None);
//! assert_eq!(stats.coverage_percent, 50);
//!
//! let curve = compute_coverage_curve(&words, &tracked);
//! assert!(curve.tracked_final_percent > 0.0);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod coverage;
pub mod error;
pub mod export;
pub mod stats;
pub mod vocab;
pub mod word;
pub mod zipf;

pub use config::{Config, ConfigLoader, LogLevel};
pub use coverage::{
    CoverageCurveData, CoverageOptions, CoveragePoint, MAX_RANK_BOUND, compute_coverage_curve,
    compute_coverage_curve_with,
};
pub use error::{ConfigError, ConfigResult, DataError, DataResult, ExportError, ExportResult};
pub use export::{ExportMode, ExportPlan, plan_export};
pub use stats::{FrequencyBucket, FrequencyStats, StatsOptions, compute_frequency_stats};
pub use word::{CORE_MAX_LEVEL, EXTENDED_LEVEL, TrackedSet, Word};
pub use zipf::harmonic_number;

/// Default limit on input file size, in bytes (32 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 32 * 1024 * 1024;
