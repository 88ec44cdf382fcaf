//! Top-level module for the name generation system.
//!
//! This module provides:
//! - Input ingestion (`SourceTable`)
//! - Role-specific name pools and the sampler joining them
//! - Weighted option tables and per-record categorical draws
//! - Style dispatch (`Style`, `StyleSet`)
//! - The composer and the high-level `Generator`

/// High-level interface: sampling, then parallel composition.
pub mod generator;

/// Run parameters (`GenerationInput`, `StyleAssignment`).
pub mod generation_input;

/// Cleaned person table read from CSV, with optional binary cache.
pub mod source;

/// Per-role name pools and external identifier filtering.
pub mod pool;

/// Independent shuffling of pools and their positional join.
pub mod sampler;

/// Weighted categorical sampling.
pub mod weighted;

/// Title, suffix and conjunction tables; per-record draws.
pub mod attributes;

/// Display-name layouts and their placeholder contracts.
pub mod style;

/// Per-record field resolution and rendering.
pub mod composer;
