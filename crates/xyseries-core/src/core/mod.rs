//! # Core Module
//!
//! The data model of the library: the paired-series container, its point and comparison
//! helper types, its error taxonomy and its text-file persistence.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - `SeriesBuffer`, `Point2D`, `Tolerance` and the `Scalar`
//!   element trait
//! - **Errors** ([`error`]) - `SeriesError`, returned by every fallible buffer operation
//! - **File I/O** ([`io`]) - Reading and writing tab-separated (X, Y) text files

pub mod error;
pub mod io;
pub mod models;
