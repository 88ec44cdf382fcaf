use std::fs;
use std::path::Path;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use super::weighted::WeightedTable;

// Titles shared by both genders. Common titles are weighted by how
// often they appear in real mailing lists.
const NEUTRAL_PREFIXES: [(&str, u32); 6] = [
	("Dr.", 10),
	("Rev.", 1),
	("LTC", 1),
	("LtCol.", 1),
	("LCDR", 1),
	("SSgt", 1),
];

// https://en.wikipedia.org/wiki/Post-nominal_letters
const NEUTRAL_SUFFIXES: [(&str, u32); 7] = [
	("PhD", 1),
	("CPA", 1),
	("MD", 1),
	("USN", 1),
	("USAF", 1),
	("USMC", 1),
	("USCG", 1),
];

const GENERATIONAL_SUFFIXES: [(&str, u32); 11] = [
	("Sr.", 1),
	("Jr.", 1),
	("II", 1),
	("III", 1),
	("IV", 1),
	("V", 1),
	("VI", 1),
	("VII", 1),
	("VIII", 1),
	("IX", 1),
	("X", 1),
];

const CONJUNCTIONS: [(&str, u32); 3] = [("and", 10), ("&", 10), ("/", 1)];

/// The five option tables the composer draws from.
///
/// Defaults reproduce the observed real-world ratios; a JSON file with
/// the same shape can replace any of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttributeTables {
	pub male_prefix: WeightedTable,
	pub female_prefix: WeightedTable,
	pub male_suffix: WeightedTable,
	pub female_suffix: WeightedTable,
	pub conjunction: WeightedTable,
}

impl AttributeTables {
	/// Loads tables from a JSON file and validates every one of them.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SynthError> {
		let text = fs::read_to_string(path)?;
		let tables: Self = serde_json::from_str(&text)?;
		tables.validate()?;
		Ok(tables)
	}

	pub fn validate(&self) -> Result<(), SynthError> {
		self.male_prefix.validate()?;
		self.female_prefix.validate()?;
		self.male_suffix.validate()?;
		self.female_suffix.validate()?;
		self.conjunction.validate()
	}

	fn build_default() -> Result<Self, SynthError> {
		let mut male_prefix = vec![("Mr.", 20)];
		male_prefix.extend(NEUTRAL_PREFIXES);

		let mut female_prefix = vec![("Miss", 20), ("Ms.", 20), ("Mrs.", 20)];
		female_prefix.extend(NEUTRAL_PREFIXES);

		Ok(Self {
			male_prefix: WeightedTable::from_pairs("male_prefix", &male_prefix)?,
			female_prefix: WeightedTable::from_pairs("female_prefix", &female_prefix)?,
			male_suffix: WeightedTable::from_pairs("male_suffix", &GENERATIONAL_SUFFIXES)?,
			female_suffix: WeightedTable::from_pairs("female_suffix", &NEUTRAL_SUFFIXES)?,
			conjunction: WeightedTable::from_pairs("conjunction", &CONJUNCTIONS)?,
		})
	}
}

impl Default for AttributeTables {
	fn default() -> Self {
		// The built-in constants are non-empty with positive weights.
		Self::build_default().expect("built-in option tables are valid")
	}
}

/// One record's independent categorical draws.
///
/// `style_index` is not drawn here: it depends on the style assignment
/// strategy and is supplied by the composer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoricalDraw {
	pub male_prefix: String,
	pub female_prefix: String,
	pub male_suffix: String,
	pub female_suffix: String,
	pub conjunction: String,
	pub is_first_male: bool,
	pub remove_punctuation: bool,
	pub style_index: usize,
}

impl CategoricalDraw {
	/// Draws every attribute from `tables`.
	///
	/// `punctuation_probability` is the chance of stripping periods.
	pub fn draw<R: Rng>(
		tables: &AttributeTables,
		punctuation_probability: f64,
		style_index: usize,
		rng: &mut R,
	) -> Self {
		Self {
			male_prefix: tables.male_prefix.pick(rng).to_owned(),
			female_prefix: tables.female_prefix.pick(rng).to_owned(),
			male_suffix: tables.male_suffix.pick(rng).to_owned(),
			female_suffix: tables.female_suffix.pick(rng).to_owned(),
			conjunction: tables.conjunction.pick(rng).to_owned(),
			is_first_male: rng.random_bool(0.5),
			remove_punctuation: rng.random_bool(punctuation_probability),
			style_index,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn default_tables_keep_real_world_ratios() {
		let tables = AttributeTables::default();
		assert_eq!(tables.male_prefix.total_weight(), 35);
		assert_eq!(tables.female_prefix.total_weight(), 75);
		assert_eq!(tables.male_suffix.total_weight(), 11);
		assert_eq!(tables.female_suffix.total_weight(), 7);
		assert_eq!(tables.conjunction.total_weight(), 21);

		let mr = tables.male_prefix.probability("Mr.");
		let rev = tables.male_prefix.probability("Rev.");
		assert!((mr / rev - 20.0).abs() < 1e-9);
		assert_eq!(tables.female_prefix.probability("Mr."), 0.0);
		assert_eq!(tables.female_suffix.probability("Jr."), 0.0);
	}

	#[test]
	fn mr_is_drawn_about_twenty_times_as_often_as_rare_titles() {
		let tables = AttributeTables::default();
		let mut rng = ChaCha8Rng::seed_from_u64(42);
		let rare = ["Rev.", "LTC", "LtCol.", "LCDR", "SSgt"];

		let mut mr = 0usize;
		let mut rare_total = 0usize;
		for _ in 0..10_000 {
			let draw = CategoricalDraw::draw(&tables, 0.5, 0, &mut rng);
			if draw.male_prefix == "Mr." {
				mr += 1;
			} else if rare.contains(&draw.male_prefix.as_str()) {
				rare_total += 1;
			}
		}

		let ratio = mr as f64 / (rare_total as f64 / rare.len() as f64);
		assert!((17.0..=23.0).contains(&ratio), "Mr. to rare ratio was {ratio}");
	}

	#[test]
	fn punctuation_is_stripped_for_about_half_the_records() {
		let tables = AttributeTables::default();
		let mut rng = ChaCha8Rng::seed_from_u64(3);
		let stripped = (0..10_000)
			.filter(|_| CategoricalDraw::draw(&tables, 0.5, 0, &mut rng).remove_punctuation)
			.count();
		assert!((4_500..=5_500).contains(&stripped), "stripped {stripped} of 10000");
	}

	#[test]
	fn tables_load_from_json() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tables.json");
		let mut tables = AttributeTables::default();
		tables.conjunction = WeightedTable::from_pairs("conjunction", &[("+", 1)]).unwrap();
		fs::write(&path, serde_json::to_string(&tables).unwrap()).unwrap();

		let loaded = AttributeTables::from_json_file(&path).unwrap();
		assert_eq!(loaded, tables);
	}

	#[test]
	fn json_tables_are_validated() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tables.json");
		let mut value = serde_json::to_value(AttributeTables::default()).unwrap();
		value["conjunction"]["options"] = serde_json::json!([]);
		fs::write(&path, value.to_string()).unwrap();

		let err = AttributeTables::from_json_file(&path).unwrap_err();
		assert!(matches!(err, SynthError::InvalidTable { .. }));
	}
}
