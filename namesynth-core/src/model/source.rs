use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::io::{build_output_path, get_filename};

/// Declared gender of a source person.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
}

impl Gender {
	/// Parses the gender tag of an input row. Anything other than
	/// `male`/`female` (case-insensitive) is rejected.
	pub fn parse(tag: &str) -> Option<Self> {
		match tag.trim().to_ascii_lowercase().as_str() {
			"male" => Some(Gender::Male),
			"female" => Some(Gender::Female),
			_ => None,
		}
	}
}

/// One cleaned input row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceRecord {
	pub given: String,
	pub surname: String,
	pub gender: Gender,
}

impl SourceRecord {
	pub fn new(given: &str, surname: &str, gender: Gender) -> Self {
		Self { given: given.to_owned(), surname: surname.to_owned(), gender }
	}
}

/// Where to find each logical column in an input CSV, and which rows to keep.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
	pub given_column: String,
	pub surname_column: String,
	pub gender_column: String,
	/// Citizenship column. `None` disables the country filter.
	pub country_column: Option<String>,
	/// Accepted citizenship values.
	pub countries: Vec<String>,
}

impl Default for IngestConfig {
	/// Column names of the Wikidata person export, restricted to the
	/// United States, Canada and the United Kingdom.
	fn default() -> Self {
		Self {
			given_column: "given_nameLabel".to_owned(),
			surname_column: "family_nameLabel".to_owned(),
			gender_column: "sex_or_genderLabel".to_owned(),
			country_column: Some("country_of_citizenshipLabel".to_owned()),
			countries: vec![
				"United States of America".to_owned(),
				"Canada".to_owned(),
				"United Kingdom".to_owned(),
			],
		}
	}
}

impl IngestConfig {
	/// Plain `given`, `surname`, `gender` columns with no country filter.
	pub fn plain() -> Self {
		Self {
			given_column: "given".to_owned(),
			surname_column: "surname".to_owned(),
			gender_column: "gender".to_owned(),
			country_column: None,
			countries: Vec::new(),
		}
	}
}

/// Row counts collected while reading one input file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
	pub original: usize,
	/// Rows with an empty required value or an unknown gender tag.
	pub malformed: usize,
	pub wrong_country: usize,
	pub duplicates: usize,
	pub kept: usize,
}

/// Cleaned person table the sampler draws from.
///
/// # Invariants
/// - No two records are identical
/// - Every record has a non-empty given name and surname
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SourceTable {
	records: Vec<SourceRecord>,
	source_names: Vec<String>,
}

/// On-disk cache: the parsed table plus the settings it was built with.
#[derive(Serialize, Deserialize)]
struct CachedTable {
	config: IngestConfig,
	table: SourceTable,
}

impl SourceTable {
	/// Builds a table from already clean records, dropping exact duplicates.
	pub fn from_records<I: IntoIterator<Item = SourceRecord>>(records: I) -> Self {
		let mut seen = HashSet::new();
		let records = records.into_iter().filter(|r| seen.insert(r.clone())).collect();
		Self { records, source_names: Vec::new() }
	}

	/// Loads a table from a CSV file, optionally through a binary cache.
	///
	/// - With `use_cache`, a `.bin` file next to the input is read if it
	///   exists and was built with the same `config`; otherwise the CSV is
	///   parsed and the cache rewritten.
	/// - Uses `postcard` for compact serialization.
	/// - Statistics are zero when the cache is hit.
	pub fn load<P: AsRef<Path>>(
		filepath: P,
		config: &IngestConfig,
		use_cache: bool,
	) -> Result<(Self, IngestStats), SynthError> {
		let (mut table, stats) = if use_cache {
			let binary_data_path = build_output_path(&filepath, "bin")?;
			match Self::read_cache(&binary_data_path, config) {
				Some(table) => (table, IngestStats::default()),
				None => {
					let (table, stats) = Self::from_csv(&filepath, config)?;
					let cached = CachedTable { config: config.clone(), table };
					let bytes = postcard::to_stdvec(&cached)?;
					std::fs::write(&binary_data_path, bytes)?;
					(cached.table, stats)
				}
			}
		} else {
			Self::from_csv(&filepath, config)?
		};

		table.source_names = vec![get_filename(&filepath)?];
		Ok((table, stats))
	}

	/// Returns the cached table if the cache exists, decodes, and matches `config`.
	fn read_cache(path: &Path, config: &IngestConfig) -> Option<Self> {
		let bytes = std::fs::read(path).ok()?;
		let cached: CachedTable = match postcard::from_bytes(&bytes) {
			Ok(cached) => cached,
			Err(e) => {
				log::warn!("Ignoring unreadable cache {}: {e}", path.display());
				return None;
			}
		};
		if cached.config != *config {
			log::info!("Cache {} was built with other ingest settings, re-reading", path.display());
			return None;
		}
		log::info!("Reading cached source table: {}", path.display());
		Some(cached.table)
	}

	/// Reads and filters a CSV file.
	///
	/// # Behavior
	/// - Locates configured columns by header name.
	/// - Drops rows with an empty required value or an unknown gender tag.
	/// - Drops rows outside the accepted countries (when configured).
	/// - Drops exact duplicate rows.
	///
	/// # Errors
	/// `MissingColumn` if a configured column is absent, or CSV/I/O errors.
	pub fn from_csv<P: AsRef<Path>>(filepath: P, config: &IngestConfig) -> Result<(Self, IngestStats), SynthError> {
		log::info!("Reading file: {}", filepath.as_ref().display());
		let file = std::fs::File::open(&filepath)?;
		Self::from_reader(file, config)
	}

	/// Same as [`SourceTable::from_csv`] over any reader of CSV text.
	///
	/// Rows with too few fields are read, then counted as malformed.
	pub fn from_reader<R: std::io::Read>(
		input: R,
		config: &IngestConfig,
	) -> Result<(Self, IngestStats), SynthError> {
		let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
		let headers = reader.headers()?.clone();
		let column = |name: &str| {
			headers
				.iter()
				.position(|h| h == name)
				.ok_or_else(|| SynthError::MissingColumn(name.to_owned()))
		};
		let given_idx = column(&config.given_column)?;
		let surname_idx = column(&config.surname_column)?;
		let gender_idx = column(&config.gender_column)?;
		let country_idx = match &config.country_column {
			Some(name) => Some(column(name)?),
			None => None,
		};

		let mut stats = IngestStats::default();
		let mut seen = HashSet::new();
		let mut records = Vec::new();

		for row in reader.records() {
			let row = row?;
			stats.original += 1;

			let given = row.get(given_idx).unwrap_or_default().trim();
			let surname = row.get(surname_idx).unwrap_or_default().trim();
			let gender = row.get(gender_idx).and_then(Gender::parse);

			let gender = match gender {
				Some(g) if !given.is_empty() && !surname.is_empty() => g,
				_ => {
					stats.malformed += 1;
					continue;
				}
			};

			if let Some(idx) = country_idx {
				let country = row.get(idx).unwrap_or_default().trim();
				if !config.countries.iter().any(|c| c == country) {
					stats.wrong_country += 1;
					continue;
				}
			}

			let record = SourceRecord::new(given, surname, gender);
			if !seen.insert(record.clone()) {
				stats.duplicates += 1;
				continue;
			}
			records.push(record);
		}

		stats.kept = records.len();
		log::info!("Original row count: {}", stats.original);
		log::info!(
			"Dropped rows: malformed {}; country {}; duplicate {}",
			stats.malformed,
			stats.wrong_country,
			stats.duplicates
		);
		log::info!("Filtered row count: {}", stats.kept);

		Ok((Self { records, source_names: Vec::new() }, stats))
	}

	pub fn records(&self) -> &[SourceRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Names of the files this table was built from.
	pub fn source_names(&self) -> &[String] {
		&self.source_names
	}

	/// Appends another table, keeping the no-duplicate invariant.
	pub fn merge(&mut self, other: &Self) {
		let mut seen: HashSet<SourceRecord> = self.records.iter().cloned().collect();
		for record in &other.records {
			if seen.insert(record.clone()) {
				self.records.push(record.clone());
			}
		}
		self.source_names.extend(other.source_names.iter().cloned());
	}
}
