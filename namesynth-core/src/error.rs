use thiserror::Error;

/// Errors raised by the generation engine and its ingestion layer.
///
/// An empty pool is deliberately absent: it produces an empty result,
/// not an error.
#[derive(Error, Debug)]
pub enum SynthError {
	/// A style references a placeholder that is not populated on the record.
	#[error("missing field `{field}` for style `{style}`")]
	MissingField { field: &'static str, style: &'static str },

	/// A configured input column is absent from the CSV header.
	#[error("missing column `{0}` in input header")]
	MissingColumn(String),

	/// A weighted option table cannot be sampled from.
	#[error("invalid option table `{name}`: {reason}")]
	InvalidTable { name: String, reason: String },

	/// A caller-supplied parameter is out of range.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// Binary source cache could not be encoded or decoded.
	#[error("cache error: {0}")]
	Cache(#[from] postcard::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
