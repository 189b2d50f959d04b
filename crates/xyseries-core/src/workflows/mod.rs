//! # Workflows Module
//!
//! End-to-end procedures built from the core container and the engine algorithms.
//!
//! ## Overview
//!
//! A workflow owns a complete task: it validates its inputs, streams data from disk,
//! reports progress through a [`ProgressReporter`](crate::engine::progress::ProgressReporter)
//! and returns a summary of what it did. Front-ends such as the `xyhist` binary only
//! translate user input into a configuration and render the returned report.
//!
//! ## Architecture
//!
//! - **Histogram Workflow** ([`histogram`]) - Bins a file of whitespace-separated samples
//!   into a fixed number of equal-width bins and writes the result as an (edge, count)
//!   series file.

pub mod histogram;
