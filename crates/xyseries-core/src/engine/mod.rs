//! # Engine Module
//!
//! Algorithms operating on series buffers, and the configuration, progress and error
//! plumbing used by the workflows built on top of them.
//!
//! ## Architecture
//!
//! - **Statistics** ([`statistics`]) - Cached extrema, sums, means and standard deviations
//! - **Searching** ([`search`]) - Tolerance-aware lookups and ranged extrema
//! - **Value Histograms** ([`histogram`]) - Counting distinct values of one axis
//! - **Fixed-Range Binning** ([`binning`]) - Bin layouts and the spectrum accumulator
//! - **Configuration** ([`config`]) - Parameters of the histogram workflow
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Workflow-level error types

pub mod binning;
pub mod config;
pub mod error;
pub mod histogram;
pub mod progress;
pub mod search;
pub mod statistics;
