use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SynthError;
use super::attributes::{AttributeTables, CategoricalDraw};
use super::generation_input::{GenerationInput, StyleAssignment};
use super::sampler::CombinedRecord;
use super::style::{NameFields, StyleSet};

/// Random stream for one row.
///
/// Stream 0 belongs to the sampler; row `i` uses stream `i + 1`. A row's
/// draws therefore depend only on the seed and its index, not on which
/// thread composes it or in what order.
pub fn row_rng(seed: u64, row_index: usize) -> ChaCha8Rng {
	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	rng.set_stream(row_index as u64 + 1);
	rng
}

fn strip_periods(value: &str) -> String {
	value.replace('.', "")
}

/// Turns combined records into display names.
///
/// # Responsibilities
/// - Draw the categorical attributes of a record
/// - Resolve the first person and apply punctuation stripping
/// - Render the selected style
#[derive(Clone, Debug)]
pub struct Composer {
	style_set: StyleSet,
	assignment: StyleAssignment,
	punctuation_probability: f64,
	tables: AttributeTables,
}

impl Composer {
	pub fn new(input: &GenerationInput) -> Self {
		Self {
			style_set: input.style_set,
			assignment: input.assignment,
			punctuation_probability: input.punctuation_probability(),
			tables: input.tables().clone(),
		}
	}

	pub fn style_set(&self) -> StyleSet {
		self.style_set
	}

	/// Picks the style index of row `row_index`.
	pub fn style_index<R: Rng>(&self, row_index: usize, rng: &mut R) -> usize {
		let count = self.style_set.len();
		match self.assignment {
			StyleAssignment::Cyclic => row_index % count,
			StyleAssignment::Uniform => rng.random_range(0..count),
		}
	}

	/// Draws every categorical attribute of one row.
	pub fn draw<R: Rng>(&self, row_index: usize, rng: &mut R) -> CategoricalDraw {
		let style_index = self.style_index(row_index, rng);
		CategoricalDraw::draw(&self.tables, self.punctuation_probability, style_index, rng)
	}

	/// Resolves the fields a style can reference.
	///
	/// - `given`, `prefix` and `suffix` follow `is_first_male`
	/// - With `remove_punctuation`, periods are stripped from titles and
	///   suffixes. The legacy style set leaves `prefix` untouched.
	pub fn fields(&self, record: &CombinedRecord, draw: &CategoricalDraw) -> NameFields {
		let (given, mut prefix, mut suffix) = if draw.is_first_male {
			(&record.male, draw.male_prefix.clone(), draw.male_suffix.clone())
		} else {
			(&record.female, draw.female_prefix.clone(), draw.female_suffix.clone())
		};
		let mut male_prefix = draw.male_prefix.clone();
		let mut female_prefix = draw.female_prefix.clone();

		if draw.remove_punctuation {
			male_prefix = strip_periods(&male_prefix);
			female_prefix = strip_periods(&female_prefix);
			suffix = strip_periods(&suffix);
			if self.style_set.strips_first_person_prefix() {
				prefix = strip_periods(&prefix);
			}
		}

		NameFields {
			given: Some(given.clone()),
			surname: Some(record.surname.clone()),
			prefix: Some(prefix),
			suffix: Some(suffix),
			male: Some(record.male.clone()),
			female: Some(record.female.clone()),
			conjunction: Some(draw.conjunction.clone()),
			male_prefix: Some(male_prefix),
			female_prefix: Some(female_prefix),
		}
	}

	/// Builds the display name of a record from an existing draw.
	///
	/// # Errors
	/// - `InvalidInput` if the style index is out of range
	/// - `MissingField` if the style references an unset field
	pub fn assemble(&self, record: &CombinedRecord, draw: &CategoricalDraw) -> Result<String, SynthError> {
		let style = self.style_set.get(draw.style_index).ok_or_else(|| {
			SynthError::InvalidInput(format!(
				"style index {} out of range for {} styles",
				draw.style_index,
				self.style_set.len()
			))
		})?;
		style.render(&self.fields(record, draw))
	}

	/// Draws attributes with `rng` and assembles the name.
	pub fn compose<R: Rng>(&self, row_index: usize, record: &CombinedRecord, rng: &mut R) -> Result<String, SynthError> {
		let draw = self.draw(row_index, rng);
		self.assemble(record, &draw)
	}

	/// Composes a row with its own stream derived from `seed`.
	pub fn compose_seeded(&self, seed: u64, row_index: usize, record: &CombinedRecord) -> Result<String, SynthError> {
		self.compose(row_index, record, &mut row_rng(seed, row_index))
	}
}
