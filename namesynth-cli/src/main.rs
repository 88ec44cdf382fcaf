use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use namesynth_core::io::write_names;
use namesynth_core::model::attributes::AttributeTables;
use namesynth_core::model::generation_input::{GenerationInput, StyleAssignment};
use namesynth_core::model::generator::Generator;
use namesynth_core::model::source::{IngestConfig, SourceTable};
use namesynth_core::model::style::StyleSet;

/// Generate synthetic display names from a person table.
#[derive(Parser)]
#[command(name = "namesynth", version)]
struct Args {
	/// Person CSV (for example a Wikidata export)
	input: PathBuf,
	/// Number of names to generate
	count: usize,
	/// Output CSV with a single `name` column
	output: PathBuf,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
	/// Style set: canonical or legacy
	#[arg(long, default_value = "canonical")]
	style_set: StyleSet,
	/// How rows get a style: cyclic or uniform
	#[arg(long, default_value = "cyclic")]
	assignment: StyleAssignment,
	/// Probability of stripping periods from titles and suffixes
	#[arg(long, default_value_t = 0.5)]
	punctuation_probability: f64,
	/// JSON file replacing the title, suffix and conjunction tables
	#[arg(long)]
	tables: Option<PathBuf>,

	/// Given-name column
	#[arg(long, default_value = "given_nameLabel")]
	given_column: String,
	/// Surname column
	#[arg(long, default_value = "family_nameLabel")]
	surname_column: String,
	/// Gender column (`male` or `female`)
	#[arg(long, default_value = "sex_or_genderLabel")]
	gender_column: String,
	/// Citizenship column
	#[arg(long, default_value = "country_of_citizenshipLabel")]
	country_column: String,
	/// Accepted citizenship, repeatable
	#[arg(long = "country")]
	countries: Vec<String>,
	/// Keep every country (the citizenship column may be absent)
	#[arg(long)]
	all_countries: bool,
	/// Reuse or write a binary cache of the parsed input next to it
	#[arg(long)]
	cache: bool,
}

impl Args {
	fn ingest_config(&self) -> IngestConfig {
		let mut config = IngestConfig {
			given_column: self.given_column.clone(),
			surname_column: self.surname_column.clone(),
			gender_column: self.gender_column.clone(),
			..IngestConfig::default()
		};
		if self.all_countries {
			config.country_column = None;
			config.countries.clear();
		} else {
			config.country_column = Some(self.country_column.clone());
			if !self.countries.is_empty() {
				config.countries = self.countries.clone();
			}
		}
		config
	}

	fn generation_input(&self) -> Result<GenerationInput, Box<dyn std::error::Error>> {
		let mut input = GenerationInput::new(self.count)?;
		input.seed = self.seed;
		input.style_set = self.style_set;
		input.assignment = self.assignment;
		input.set_punctuation_probability(self.punctuation_probability)?;
		if let Some(path) = &self.tables {
			input.set_tables(AttributeTables::from_json_file(path)?)?;
		}
		Ok(input)
	}
}

fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	if let Err(e) = run() {
		log::error!("{e}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let input = args.generation_input()?;

	let (table, _stats) = SourceTable::load(&args.input, &args.ingest_config(), args.cache)?;

	let output = Generator::new(input).generate(&table);
	log::info!("Seed: {}", output.seed);

	write_names(&args.output, &output.names)?;
	log::info!("Wrote {} names to {}", output.names.len(), args.output.display());
	Ok(())
}
