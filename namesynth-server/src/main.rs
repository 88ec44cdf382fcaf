use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use namesynth_core::io::list_files;
use namesynth_core::model::generation_input::{GenerationInput, StyleAssignment};
use namesynth_core::model::generator::Generator;
use namesynth_core::model::source::{IngestConfig, SourceTable};
use namesynth_core::model::style::StyleSet;

const DATA_DIR: &str = "./data";

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	seed: Option<u64>,
	style_set: Option<StyleSet>,
	assignment: Option<StyleAssignment>,
}

#[derive(Deserialize)]
struct StylesParams {
	style_set: Option<StyleSet>,
}

#[derive(Deserialize)]
struct SourceQuery {
	names: Option<String>,
}

struct SharedData {
	table: SourceTable,
}

/// Path of a named source under `DATA_DIR`.
///
/// Returns `None` for names that could leave the data directory.
fn source_path(name: &str) -> Option<String> {
	let is_plain = !name.is_empty()
		&& !name.contains(['/', '\\'])
		&& name != "."
		&& !name.contains("..");
	is_plain.then(|| format!("{DATA_DIR}/{name}.csv"))
}

impl GenerateParams {
	fn generation_input(&self) -> Result<GenerationInput, String> {
		let mut input = GenerationInput::new(self.count.unwrap_or(10)).map_err(|e| e.to_string())?;
		input.seed = self.seed;
		input.style_set = self.style_set.unwrap_or_default();
		input.assignment = self.assignment.unwrap_or_default();
		Ok(input)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates names from the loaded source tables.
/// Returns one name per line; the seed used is in the `x-seed` header.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Source lock failed"),
	};

	let output = Generator::new(input).generate(&shared_data.table);
	HttpResponse::Ok()
		.insert_header(("x-seed", output.seed.to_string()))
		.body(output.names.join("\n"))
}

#[get("/v1/styles")]
async fn get_styles(query: web::Query<StylesParams>) -> impl Responder {
	let styles: Vec<&str> = query
		.style_set
		.unwrap_or_default()
		.styles()
		.iter()
		.map(|style| style.template())
		.collect();
	HttpResponse::Ok().body(styles.join("\n"))
}

#[get("/v1/sources")]
async fn get_sources() -> impl Responder {
	match list_files(DATA_DIR, "csv") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".csv", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list sources"),
	}
}

#[get("/v1/loaded_sources")]
async fn get_loaded_sources(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Source lock failed"),
	};
	HttpResponse::Ok().body(shared_data.table.source_names().join("\n"))
}

#[put("/v1/load_sources")]
async fn put_sources(data: web::Data<Mutex<SharedData>>, query: web::Query<SourceQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty source name"),
	};

	let source_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let config = IngestConfig::default();
	let mut table = SourceTable::default();
	for name in source_names {
		let Some(source_path) = source_path(name) else {
			return HttpResponse::BadRequest().body(format!("Invalid source name: {name}"));
		};
		let partial_table = match SourceTable::load(&source_path, &config, true) {
			Ok((t, _)) => t,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load source: {e}")),
		};
		table.merge(&partial_table);
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Source lock failed"),
	};
	log::info!("Loaded {} records from {:?}", table.len(), table.source_names());
	shared_data.table = table;

	HttpResponse::Ok().body("Sources loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty source table wrapped in a `Mutex`; sources are
/// loaded through `/v1/load_sources`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Sources are read from `./data/<name>.csv` (Wikidata export columns).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let shared_data = SharedData {
		table: SourceTable::default(),
	};
	let shared_table = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_table.clone())
			.service(get_generated)
			.service(get_styles)
			.service(get_sources)
			.service(put_sources)
			.service(get_loaded_sources)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
