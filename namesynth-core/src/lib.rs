//! Synthetic display-name generation library.
//!
//! This crate turns a table of real person records into plausible,
//! non-identifying display names such as `Mr. and Mrs. John Smith`:
//! - Independent sampling of male, female and surname pools
//! - Weighted categorical draws for titles, suffixes and conjunctions
//! - Style dispatch over a fixed, ordered set of name templates
//! - Seeded, chunk-parallel composition with reproducible output
//!
//! The high-level entry points are [`model::generator::Generator`] and
//! [`model::source::SourceTable`].

/// Sampling, composition and generation logic.
pub mod model;

/// Errors shared by every module of the crate.
pub mod error;

/// I/O utilities (CSV output, path helpers, directory listing).
pub mod io;

pub use error::SynthError;
