use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// A finite, ordered list of options with integer frequency weights.
///
/// Each option is picked with probability `weight / total_weight`.
/// Options keep their declaration order, which makes sampling
/// reproducible for a given random stream.
///
/// ## Invariants
/// - At least one option
/// - Total weight is strictly positive (zero-weight options are allowed
///   but never picked)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightedTable {
	/// Human-readable name, used in error messages.
	name: String,
	/// Options and their relative weights.
	/// Example: [("Mr.", 20), ("Dr.", 10), ("Rev.", 1)]
	options: Vec<(String, u32)>,
}

impl WeightedTable {
	/// Creates a validated table.
	///
	/// # Errors
	/// Returns `InvalidTable` when the table is empty or all weights are zero.
	pub fn new<S: Into<String>>(name: S, options: Vec<(String, u32)>) -> Result<Self, SynthError> {
		let table = Self { name: name.into(), options };
		table.validate()?;
		Ok(table)
	}

	/// Builds a table from static `(value, weight)` pairs.
	pub fn from_pairs(name: &str, pairs: &[(&str, u32)]) -> Result<Self, SynthError> {
		let options = pairs.iter().map(|(value, weight)| ((*value).to_owned(), *weight)).collect();
		Self::new(name, options)
	}

	/// Checks the table invariants. Tables deserialized from JSON must be
	/// validated before use.
	pub fn validate(&self) -> Result<(), SynthError> {
		if self.options.is_empty() {
			return Err(SynthError::InvalidTable {
				name: self.name.clone(),
				reason: "no options".to_owned(),
			});
		}
		if self.total_weight() == 0 {
			return Err(SynthError::InvalidTable {
				name: self.name.clone(),
				reason: "total weight is zero".to_owned(),
			});
		}
		Ok(())
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Sum of all weights.
	pub fn total_weight(&self) -> u64 {
		self.options.iter().map(|(_, weight)| u64::from(*weight)).sum()
	}

	/// Iterates over `(value, weight)` in declaration order.
	pub fn options(&self) -> impl Iterator<Item = (&str, u32)> {
		self.options.iter().map(|(value, weight)| (value.as_str(), *weight))
	}

	/// Probability of drawing `value`, or 0.0 if it is not an option.
	pub fn probability(&self, value: &str) -> f64 {
		let total = self.total_weight();
		if total == 0 {
			return 0.0;
		}
		let weight: u64 = self
			.options
			.iter()
			.filter(|(v, _)| v == value)
			.map(|(_, w)| u64::from(*w))
			.sum();
		weight as f64 / total as f64
	}

	/// Picks one option using weighted random sampling.
	///
	/// This method performs:
	/// - an O(n) scan over the options
	/// - a cumulative subtraction to select a bucket
	pub fn pick<R: Rng>(&self, rng: &mut R) -> &str {
		let total = self.total_weight();
		let mut r = rng.random_range(0..total.max(1));

		for (value, weight) in &self.options {
			let weight = u64::from(*weight);
			if r < weight {
				return value;
			}
			r -= weight;
		}

		// Only reachable on an unvalidated zero-weight table.
		self.options.last().map(|(value, _)| value.as_str()).unwrap_or_default()
	}
}
