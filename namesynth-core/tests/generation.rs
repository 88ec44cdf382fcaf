use namesynth_core::io::write_names;
use namesynth_core::model::generation_input::{GenerationInput, StyleAssignment};
use namesynth_core::model::generator::Generator;
use namesynth_core::model::source::{Gender, IngestConfig, SourceRecord, SourceTable};
use namesynth_core::model::style::StyleSet;

fn population(size: usize) -> SourceTable {
	let mut records = Vec::new();
	for i in 0..size {
		records.push(SourceRecord::new(&format!("Male{i}"), &format!("Surname{i}"), Gender::Male));
		records.push(SourceRecord::new(&format!("Female{i}"), &format!("Family{i}"), Gender::Female));
	}
	SourceTable::from_records(records)
}

fn generator(count: usize, seed: u64) -> Generator {
	let mut input = GenerationInput::new(count).unwrap();
	input.seed = Some(seed);
	Generator::new(input)
}

#[test]
fn small_scenario_yields_two_names() {
	let table = SourceTable::from_records([
		SourceRecord::new("John", "Smith", Gender::Male),
		SourceRecord::new("Robert", "Doe", Gender::Male),
		SourceRecord::new("Jane", "Smith", Gender::Female),
		SourceRecord::new("Mary", "Doe", Gender::Female),
	]);
	let output = generator(2, 8).generate(&table);
	assert_eq!(output.names.len(), 2);
	assert_eq!(output.failures, 0);
}

#[test]
fn output_count_is_bounded_by_pools_and_request() {
	let table = population(30);
	assert_eq!(generator(10, 1).generate(&table).names.len(), 10);
	// Surname pool holds 60 entries, given-name pools 30 each.
	assert_eq!(generator(100, 1).generate(&table).names.len(), 30);
}

#[test]
fn missing_gender_gives_empty_output() {
	let table = SourceTable::from_records([SourceRecord::new("John", "Smith", Gender::Male)]);
	let output = generator(5, 0).generate(&table);
	assert!(output.names.is_empty());
	assert_eq!(output.failures, 0);
}

#[test]
fn fixed_seed_replays_the_run() {
	let table = population(200);
	let a = generator(150, 77).generate(&table);
	let b = generator(150, 77).generate(&table);
	let c = generator(150, 78).generate(&table);
	assert_eq!(a, b);
	assert_ne!(a.names, c.names);
}

#[test]
fn unseeded_run_reports_its_seed() {
	let table = population(50);
	let input = GenerationInput::new(40).unwrap();
	let first = Generator::new(input).generate(&table);

	let replay = generator(40, first.seed).generate(&table);
	assert_eq!(first.names, replay.names);
}

#[test]
fn names_never_contain_placeholders() {
	let table = population(500);
	for style_set in [StyleSet::Canonical, StyleSet::Legacy] {
		for assignment in [StyleAssignment::Cyclic, StyleAssignment::Uniform] {
			let mut input = GenerationInput::new(500).unwrap();
			input.seed = Some(5);
			input.style_set = style_set;
			input.assignment = assignment;
			let output = Generator::new(input).generate(&table);
			assert_eq!(output.names.len(), 500);
			assert!(output.names.iter().all(|n| !n.contains('{') && !n.contains('}')));
		}
	}
}

#[test]
fn about_half_the_titled_names_lose_their_periods() {
	let table = population(10_000);
	let mut input = GenerationInput::new(10_000).unwrap();
	input.seed = Some(21);
	input.assignment = StyleAssignment::Uniform;
	let names = Generator::new(input).generate(&table).names;

	// Leading "Mr." or "Mr" comes from the male title of styles 2 and 7;
	// the period tells whether the row was stripped.
	let leading: Vec<&str> = names.iter().filter_map(|n| n.split(' ').next()).collect();
	let with_period = leading.iter().filter(|t| **t == "Mr.").count();
	let without_period = leading.iter().filter(|t| **t == "Mr").count();
	let titled = with_period + without_period;
	let share = with_period as f64 / titled as f64;
	assert!(titled > 500);
	assert!((0.4..=0.6).contains(&share), "share with period: {share}");
}

#[test]
fn identifier_rows_are_filtered_from_csv_to_output() {
	let dir = tempfile::tempdir().unwrap();
	let input_path = dir.path().join("people.csv");
	std::fs::write(
		&input_path,
		"given,surname,gender\nJohn,Q12,male\nQ4115189,Smith,male\nJane,Doe,female\nMary,Q55,female\n",
	)
	.unwrap();

	let (table, stats) = SourceTable::from_csv(&input_path, &IngestConfig::plain()).unwrap();
	assert_eq!(stats.kept, 4);

	let output = generator(10, 3).generate(&table);
	// Only one male given name survives the identifier filter.
	assert_eq!(output.names.len(), 1);
	assert!(output.names.iter().all(|n| !n.contains("Q12") && !n.contains("Q55") && !n.contains("Q4115189")));

	let output_path = dir.path().join("names.csv");
	write_names(&output_path, &output.names).unwrap();
	let written = std::fs::read_to_string(&output_path).unwrap();
	assert!(written.starts_with("name\n"));
	assert_eq!(written.lines().count(), 2);
}
