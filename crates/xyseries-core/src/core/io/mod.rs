//! Provides input/output functionality for series text files.
//!
//! The [`traits::SeriesFile`] trait defines reader/writer based entry points with
//! path-based convenience wrappers; [`xy::XyFile`] implements it for the plain
//! tab-separated (X, Y) format.

pub mod traits;
pub mod xy;
