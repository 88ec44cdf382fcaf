use std::sync::mpsc;
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::composer::Composer;
use super::generation_input::GenerationInput;
use super::sampler::{CombinedRecord, Sampler};
use super::source::SourceTable;

/// Result of one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationOutput {
	/// Generated names, in row order.
	pub names: Vec<String>,
	/// Rows dropped because their style could not be rendered.
	pub failures: usize,
	/// Seed actually used, so a run can be replayed.
	pub seed: u64,
}

/// High-level generator: sampling followed by parallel composition.
///
/// # Responsibilities
/// - Resolve the run seed
/// - Sample the combined table (completes before any row is composed)
/// - Compose rows in parallel chunks with per-row random streams
#[derive(Clone, Debug)]
pub struct Generator {
	input: GenerationInput,
	composer: Composer,
}

impl Generator {
	pub fn new(input: GenerationInput) -> Self {
		let composer = Composer::new(&input);
		Self { input, composer }
	}

	/// Seed of the run: the configured one, or a fresh one from entropy.
	fn resolve_seed(&self) -> u64 {
		self.input.seed.unwrap_or_else(|| rand::rng().random())
	}

	/// Samples `table` and composes one name per combined record.
	pub fn generate(&self, table: &SourceTable) -> GenerationOutput {
		let seed = self.resolve_seed();
		let mut rng = ChaCha8Rng::seed_from_u64(seed);
		let records = Sampler::new(self.input.count()).sample(table, &mut rng);
		log::info!("Generating names");
		self.compose_all(&records, seed)
	}

	/// Composes every record.
	///
	/// # Behavior
	/// - Splits records into chunks (based on CPU cores * factor).
	/// - Spawns one scoped thread per chunk.
	/// - Reassembles chunk results in row order.
	/// - Rows that fail are logged, counted and left out.
	///
	/// # Notes
	/// - Row `i` always uses the random stream `row_rng(seed, i)`, so the
	///   output does not depend on the number of CPUs.
	pub fn compose_all(&self, records: &[CombinedRecord], seed: u64) -> GenerationOutput {
		let mut output = GenerationOutput { seed, ..Default::default() };
		if records.is_empty() {
			return output;
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = records.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for (chunk_index, chunk) in records.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				let composer = &self.composer;
				scope.spawn(move || {
					let offset = chunk_index * chunk_size;
					let results: Vec<_> = chunk
						.iter()
						.enumerate()
						.map(|(i, record)| (offset + i, composer.compose_seeded(seed, offset + i, record)))
						.collect();
					tx.send((chunk_index, results)).ok();
				});
			}
		});
		drop(tx);

		let mut parts: Vec<_> = rx.iter().collect();
		parts.sort_by_key(|(chunk_index, _)| *chunk_index);

		output.names.reserve(records.len());
		for (_, results) in parts {
			for (row_index, result) in results {
				match result {
					Ok(name) => output.names.push(name),
					Err(e) => {
						log::error!("Row {row_index} dropped: {e}");
						output.failures += 1;
					}
				}
			}
		}

		log::info!("Generated {} names ({} dropped)", output.names.len(), output.failures);
		output
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::style::StyleSet;

	fn records(n: usize) -> Vec<CombinedRecord> {
		(0..n).map(|i| CombinedRecord::new(&format!("M{i}a"), &format!("F{i}a"), &format!("S{i}a"))).collect()
	}

	fn generator(seed: u64) -> Generator {
		let mut input = GenerationInput::new(1_000).unwrap();
		input.seed = Some(seed);
		Generator::new(input)
	}

	#[test]
	fn composes_one_name_per_record() {
		let output = generator(1).compose_all(&records(37), 1);
		assert_eq!(output.names.len(), 37);
		assert_eq!(output.failures, 0);
	}

	#[test]
	fn parallel_output_matches_sequential_composition() {
		let g = generator(4);
		let rows = records(500);
		let parallel = g.compose_all(&rows, 4).names;
		let sequential: Vec<String> = rows
			.iter()
			.enumerate()
			.map(|(i, r)| g.composer.compose_seeded(4, i, r).unwrap())
			.collect();
		assert_eq!(parallel, sequential);
	}

	#[test]
	fn cyclic_styles_follow_row_order() {
		let g = generator(2);
		let names = g.compose_all(&records(10), 2).names;
		assert!(names[0] == "M0a" || names[0] == "F0a");
		assert_eq!(names[8], "S8a Family");
		assert_eq!(names[9], "The S9a Family");
	}

	#[test]
	fn every_chunk_is_collected_when_rows_are_fewer_than_chunks() {
		let g = generator(6);
		for n in [1, 2, 3, num_cpus::get() * 8 + 1] {
			let output = g.compose_all(&records(n), 6);
			assert_eq!(output.names.len() + output.failures, n);
		}
	}

	#[test]
	fn empty_input_gives_empty_output() {
		let output = generator(3).compose_all(&[], 3);
		assert!(output.names.is_empty());
		assert_eq!(output.seed, 3);
	}

	#[test]
	fn legacy_run_uses_seven_styles() {
		let mut input = GenerationInput::new(100).unwrap();
		input.style_set = StyleSet::Legacy;
		let names = Generator::new(input).compose_all(&records(7), 0).names;
		assert_eq!(names[5], "S5a Family");
		assert_eq!(names[6], "The S6a Family");
	}
}
