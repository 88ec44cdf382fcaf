use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::error::SynthError;

/// Header of the single output column.
pub const NAME_COLUMN: &str = "name";

/// Writes generated names as a one-column CSV (`name` header, no index).
pub fn write_names<P: AsRef<Path>>(path: P, names: &[String]) -> Result<(), SynthError> {
	let file = fs::File::create(path)?;
	write_names_to(file, names)
}

/// Same as [`write_names`] but into any writer.
///
/// Quoting follows CSV rules, so a name containing a comma stays one field.
pub fn write_names_to<W: Write>(writer: W, names: &[String]) -> Result<(), SynthError> {
	let mut wtr = csv::Writer::from_writer(writer);
	wtr.write_record([NAME_COLUMN])?;
	for name in names {
		wtr.write_record([name.as_str()])?;
	}
	wtr.flush()?;
	Ok(())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/people.csv` + `"bin"` → `data/people.bin`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/people.csv"` → `"people"`
/// - `"people.csv"` → `"people"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
