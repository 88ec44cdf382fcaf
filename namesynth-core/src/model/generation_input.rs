use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use super::attributes::AttributeTables;
use super::style::StyleSet;

/// Strategy used to give each record a style index.
///
/// # Variants
/// - `Cyclic`: row `i` gets style `i % K`; every style appears
///   `N / K` times, give or take one.
/// - `Uniform`: each row draws an index uniformly from `0..K`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StyleAssignment {
	#[default]
	Cyclic,
	Uniform,
}

impl std::str::FromStr for StyleAssignment {
	type Err = SynthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"cyclic" => Ok(StyleAssignment::Cyclic),
			"uniform" => Ok(StyleAssignment::Uniform),
			other => Err(SynthError::InvalidInput(format!("unknown style assignment `{other}`"))),
		}
	}
}

/// Parameters of one generation run.
///
/// # Responsibilities
/// - Track the requested row count and the optional seed
/// - Select the style set and how styles are assigned to rows
/// - Hold the option tables and the punctuation-stripping probability
///
/// # Invariants
/// - `count >= 1`
/// - `punctuation_probability` is within `[0.0, 1.0]`
/// - `tables` are validated
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	count: usize,

	/// Seed for every random draw of the run. `None` picks one from entropy.
	pub seed: Option<u64>,

	pub style_set: StyleSet,

	pub assignment: StyleAssignment,

	/// Chance that a record has its periods stripped.
	punctuation_probability: f64,

	tables: AttributeTables,
}

impl GenerationInput {
	/// Creates an input with default settings for `count` rows.
	///
	/// # Errors
	/// Returns an error if `count` is zero.
	pub fn new(count: usize) -> Result<Self, SynthError> {
		if count == 0 {
			return Err(SynthError::InvalidInput("count must be a positive integer".to_owned()));
		}
		Ok(Self {
			count,
			seed: None,
			style_set: StyleSet::default(),
			assignment: StyleAssignment::default(),
			punctuation_probability: 0.5,
			tables: AttributeTables::default(),
		})
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn punctuation_probability(&self) -> f64 {
		self.punctuation_probability
	}

	pub fn tables(&self) -> &AttributeTables {
		&self.tables
	}

	/// Sets the probability of stripping periods (0.0..=1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_punctuation_probability(&mut self, probability: f64) -> Result<(), SynthError> {
		if !(0.0..=1.0).contains(&probability) {
			return Err(SynthError::InvalidInput(format!(
				"punctuation probability must be between 0.0 and 1.0, got {probability}"
			)));
		}
		self.punctuation_probability = probability;
		Ok(())
	}

	/// Replaces the option tables after validating them.
	pub fn set_tables(&mut self, tables: AttributeTables) -> Result<(), SynthError> {
		tables.validate()?;
		self.tables = tables;
		Ok(())
	}
}
