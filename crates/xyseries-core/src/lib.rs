//! # xyseries Core Library
//!
//! Paired-series buffers for accumulating (X, Y) measurements, computing descriptive
//! statistics over them, deriving histograms and persisting them as plain text.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that data, algorithms and complete
//! procedures can be used and tested independently.
//!
//! - **[`core`]: The Foundation.** Value types (`SeriesBuffer`, `Point2D`, `Tolerance`),
//!   the error taxonomy of the container and the tab-separated file format.
//!
//! - **[`engine`]: The Algorithms.** Statistics, searching, value histograms, fixed-range
//!   binning, progress reporting and the configuration consumed by workflows.
//!
//! - **[`workflows`]: The Public Procedures.** End-to-end pipelines such as building a
//!   binned histogram from a file of samples. This is the entry point used by the
//!   `xyhist` command-line tool.

pub mod core;
pub mod engine;
pub mod workflows;

pub use crate::core::error::SeriesError;
pub use crate::core::models::point::Point2D;
pub use crate::core::models::scalar::Scalar;
pub use crate::core::models::series::{Axis, SeriesBuffer};
pub use crate::core::models::tolerance::Tolerance;
