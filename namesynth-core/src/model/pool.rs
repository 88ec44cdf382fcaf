use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use super::source::{Gender, SourceTable};

/// Semantic role of a name pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolRole {
	Male,
	Female,
	Surname,
}

impl fmt::Display for PoolRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			PoolRole::Male => "male",
			PoolRole::Female => "female",
			PoolRole::Surname => "surname",
		})
	}
}

/// Returns true for upstream row identifiers such as `Q12` or `Q4115189`.
///
/// These leak into name columns when a label is missing from the source
/// database: one uppercase letter followed by at least two digits.
pub fn is_external_identifier(value: &str) -> bool {
	let mut chars = value.chars();
	matches!(
		(chars.next(), chars.next(), chars.next()),
		(Some(a), Some(b), Some(c)) if a.is_ascii_uppercase() && b.is_ascii_digit() && c.is_ascii_digit()
	)
}

/// Raw name strings for one role.
///
/// Duplicates are kept, so a name's share of the pool matches its share
/// of the source population.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamePool {
	role: PoolRole,
	names: Vec<String>,
}

impl NamePool {
	pub fn new(role: PoolRole, names: Vec<String>) -> Self {
		Self { role, names }
	}

	/// Extracts the pool for `role` from a source table.
	///
	/// Given-name pools take rows of the matching gender; the surname
	/// pool takes every row.
	pub fn from_table(table: &SourceTable, role: PoolRole) -> Self {
		let names = table
			.records()
			.iter()
			.filter_map(|record| match role {
				PoolRole::Male if record.gender == Gender::Male => Some(record.given.clone()),
				PoolRole::Female if record.gender == Gender::Female => Some(record.given.clone()),
				PoolRole::Surname => Some(record.surname.clone()),
				_ => None,
			})
			.collect();
		Self::new(role, names)
	}

	pub fn role(&self) -> PoolRole {
		self.role
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Drops external identifiers, returning how many were removed.
	pub fn remove_identifiers(&mut self) -> usize {
		let before = self.names.len();
		self.names.retain(|name| !is_external_identifier(name));
		let removed = before - self.names.len();
		log::debug!("{} pool: removed {} external identifiers", self.role, removed);
		removed
	}

	/// Shuffles the whole pool, then keeps the first `count` entries.
	///
	/// This is sampling without replacement; the result is densely indexed.
	pub fn shuffle_truncate<R: Rng>(&mut self, count: usize, rng: &mut R) {
		self.names.shuffle(rng);
		self.names.truncate(count);
	}

	pub fn into_names(self) -> Vec<String> {
		self.names
	}
}
