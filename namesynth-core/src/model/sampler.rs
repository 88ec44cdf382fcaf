use rand::Rng;

use serde::{Deserialize, Serialize};

use super::pool::{NamePool, PoolRole};
use super::source::SourceTable;

/// One synthetic person: three independently sampled pool entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CombinedRecord {
	pub male: String,
	pub female: String,
	pub surname: String,
}

impl CombinedRecord {
	pub fn new(male: &str, female: &str, surname: &str) -> Self {
		Self { male: male.to_owned(), female: female.to_owned(), surname: surname.to_owned() }
	}
}

/// Draws the male, female and surname pools and aligns them by position.
///
/// # Invariants
/// - Output length is `min(count, |male|, |female|, |surname|)` after
///   identifier filtering
/// - Each pool is shuffled on its own, so fields of one output row do not
///   come from the same source person
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
	count: usize,
}

impl Sampler {
	pub fn new(count: usize) -> Self {
		Self { count }
	}

	pub fn count(&self) -> usize {
		self.count
	}

	/// Builds one filtered, shuffled and truncated pool.
	pub fn sample_pool<R: Rng>(&self, table: &SourceTable, role: PoolRole, rng: &mut R) -> NamePool {
		let mut pool = NamePool::from_table(table, role);
		let removed = pool.remove_identifiers();
		if removed > 0 {
			log::info!("{}: removed {removed} entries with an external identifier", pool.role());
		}
		pool.shuffle_truncate(self.count, rng);
		pool
	}

	/// Samples the three pools and joins them into combined records.
	///
	/// An empty pool yields an empty result, not an error.
	pub fn sample<R: Rng>(&self, table: &SourceTable, rng: &mut R) -> Vec<CombinedRecord> {
		let female = self.sample_pool(table, PoolRole::Female, rng);
		let male = self.sample_pool(table, PoolRole::Male, rng);
		let surname = self.sample_pool(table, PoolRole::Surname, rng);

		let combined = Self::combine(male, female, surname);
		log::info!("Combined row count: {}", combined.len());
		combined
	}

	/// Positional join: row `i` takes entry `i` of every pool.
	pub fn combine(male: NamePool, female: NamePool, surname: NamePool) -> Vec<CombinedRecord> {
		log::info!(
			"List counts: male {}; female {}; surname {}",
			male.len(),
			female.len(),
			surname.len()
		);
		male.into_names()
			.into_iter()
			.zip(female.into_names())
			.zip(surname.into_names())
			.map(|((male, female), surname)| CombinedRecord { male, female, surname })
			.collect()
	}
}
