use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// A named field a style can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
	Given,
	Surname,
	Prefix,
	Suffix,
	Male,
	Female,
	Conjunction,
	MalePrefix,
	FemalePrefix,
}

impl Placeholder {
	pub const ALL: [Placeholder; 9] = [
		Placeholder::Given,
		Placeholder::Surname,
		Placeholder::Prefix,
		Placeholder::Suffix,
		Placeholder::Male,
		Placeholder::Female,
		Placeholder::Conjunction,
		Placeholder::MalePrefix,
		Placeholder::FemalePrefix,
	];

	/// Name used inside `{...}` in a template.
	pub fn name(self) -> &'static str {
		match self {
			Placeholder::Given => "given",
			Placeholder::Surname => "surname",
			Placeholder::Prefix => "prefix",
			Placeholder::Suffix => "suffix",
			Placeholder::Male => "male",
			Placeholder::Female => "female",
			Placeholder::Conjunction => "conjunction",
			Placeholder::MalePrefix => "male_prefix",
			Placeholder::FemalePrefix => "female_prefix",
		}
	}
}

/// Field values available to a style. Unset fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameFields {
	pub given: Option<String>,
	pub surname: Option<String>,
	pub prefix: Option<String>,
	pub suffix: Option<String>,
	pub male: Option<String>,
	pub female: Option<String>,
	pub conjunction: Option<String>,
	pub male_prefix: Option<String>,
	pub female_prefix: Option<String>,
}

impl NameFields {
	pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
		let value = match placeholder {
			Placeholder::Given => &self.given,
			Placeholder::Surname => &self.surname,
			Placeholder::Prefix => &self.prefix,
			Placeholder::Suffix => &self.suffix,
			Placeholder::Male => &self.male,
			Placeholder::Female => &self.female,
			Placeholder::Conjunction => &self.conjunction,
			Placeholder::MalePrefix => &self.male_prefix,
			Placeholder::FemalePrefix => &self.female_prefix,
		};
		value.as_deref()
	}
}

/// One display-name layout.
///
/// Each variant knows exactly which placeholders it consumes, so a
/// record can be checked against a style before rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
	Given,
	GivenSurname,
	PrefixGivenSurname,
	GivenSurnameSuffix,
	MaleAndFemale,
	FemaleAndMale,
	MaleAndFemaleSurname,
	CoupleTitles,
	SurnameFamily,
	TheSurnameFamily,
}

impl Style {
	/// The format template, e.g. `"{given} {surname}"`.
	pub fn template(self) -> &'static str {
		match self {
			Style::Given => "{given}",
			Style::GivenSurname => "{given} {surname}",
			Style::PrefixGivenSurname => "{prefix} {given} {surname}",
			Style::GivenSurnameSuffix => "{given} {surname} {suffix}",
			Style::MaleAndFemale => "{male} {conjunction} {female}",
			Style::FemaleAndMale => "{female} {conjunction} {male}",
			Style::MaleAndFemaleSurname => "{male} {conjunction} {female} {surname}",
			Style::CoupleTitles => "{male_prefix} {conjunction} {female_prefix} {male} {surname}",
			Style::SurnameFamily => "{surname} Family",
			Style::TheSurnameFamily => "The {surname} Family",
		}
	}

	/// Placeholders referenced by the template, in template order.
	pub fn placeholders(self) -> &'static [Placeholder] {
		use Placeholder::*;
		match self {
			Style::Given => &[Given],
			Style::GivenSurname => &[Given, Surname],
			Style::PrefixGivenSurname => &[Prefix, Given, Surname],
			Style::GivenSurnameSuffix => &[Given, Surname, Suffix],
			Style::MaleAndFemale => &[Male, Conjunction, Female],
			Style::FemaleAndMale => &[Female, Conjunction, Male],
			Style::MaleAndFemaleSurname => &[Male, Conjunction, Female, Surname],
			Style::CoupleTitles => &[MalePrefix, Conjunction, FemalePrefix, Male, Surname],
			Style::SurnameFamily | Style::TheSurnameFamily => &[Surname],
		}
	}

	/// Renders the style, failing on the first referenced field that is unset.
	pub fn render(self, fields: &NameFields) -> Result<String, SynthError> {
		let field = |placeholder: Placeholder| {
			fields.get(placeholder).ok_or(SynthError::MissingField {
				field: placeholder.name(),
				style: self.template(),
			})
		};

		let name = match self {
			Style::Given => field(Placeholder::Given)?.to_owned(),
			Style::SurnameFamily => format!("{} Family", field(Placeholder::Surname)?),
			Style::TheSurnameFamily => format!("The {} Family", field(Placeholder::Surname)?),
			_ => {
				// Every other layout is its fields joined by single spaces.
				let parts = self
					.placeholders()
					.iter()
					.map(|p| field(*p))
					.collect::<Result<Vec<_>, _>>()?;
				parts.join(" ")
			}
		};
		Ok(name)
	}
}

impl fmt::Display for Style {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.template())
	}
}

/// Ordered list of styles; a record's style index selects from it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StyleSet {
	/// Ten styles with symmetric first-person selection.
	#[default]
	Canonical,
	/// The earlier seven-style generation. Its first-person prefix keeps
	/// its periods when punctuation is stripped.
	Legacy,
}

const CANONICAL_STYLES: [Style; 10] = [
	Style::Given,
	Style::GivenSurname,
	Style::PrefixGivenSurname,
	Style::GivenSurnameSuffix,
	Style::MaleAndFemale,
	Style::FemaleAndMale,
	Style::MaleAndFemaleSurname,
	Style::CoupleTitles,
	Style::SurnameFamily,
	Style::TheSurnameFamily,
];

const LEGACY_STYLES: [Style; 7] = [
	Style::GivenSurname,
	Style::PrefixGivenSurname,
	Style::GivenSurnameSuffix,
	Style::MaleAndFemaleSurname,
	Style::CoupleTitles,
	Style::SurnameFamily,
	Style::TheSurnameFamily,
];

impl StyleSet {
	pub fn styles(self) -> &'static [Style] {
		match self {
			StyleSet::Canonical => &CANONICAL_STYLES,
			StyleSet::Legacy => &LEGACY_STYLES,
		}
	}

	pub fn len(self) -> usize {
		self.styles().len()
	}

	pub fn get(self, index: usize) -> Option<Style> {
		self.styles().get(index).copied()
	}

	/// Whether stripping punctuation also applies to the first-person prefix.
	pub fn strips_first_person_prefix(self) -> bool {
		matches!(self, StyleSet::Canonical)
	}
}

impl std::str::FromStr for StyleSet {
	type Err = SynthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"canonical" => Ok(StyleSet::Canonical),
			"legacy" => Ok(StyleSet::Legacy),
			other => Err(SynthError::InvalidInput(format!("unknown style set `{other}`"))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_fields() -> NameFields {
		NameFields {
			given: Some("John".into()),
			surname: Some("Smith".into()),
			prefix: Some("Mr.".into()),
			suffix: Some("Jr.".into()),
			male: Some("John".into()),
			female: Some("Jane".into()),
			conjunction: Some("and".into()),
			male_prefix: Some("Mr.".into()),
			female_prefix: Some("Mrs.".into()),
		}
	}

	/// Pulls `{name}` tokens out of a template string.
	fn template_tokens(template: &str) -> Vec<String> {
		template
			.split('{')
			.skip(1)
			.filter_map(|part| part.split_once('}').map(|(name, _)| name.to_owned()))
			.collect()
	}

	#[test]
	fn canonical_templates_are_in_index_order() {
		let templates: Vec<&str> = StyleSet::Canonical.styles().iter().map(|s| s.template()).collect();
		assert_eq!(
			templates,
			vec![
				"{given}",
				"{given} {surname}",
				"{prefix} {given} {surname}",
				"{given} {surname} {suffix}",
				"{male} {conjunction} {female}",
				"{female} {conjunction} {male}",
				"{male} {conjunction} {female} {surname}",
				"{male_prefix} {conjunction} {female_prefix} {male} {surname}",
				"{surname} Family",
				"The {surname} Family",
			]
		);
	}

	#[test]
	fn legacy_set_has_seven_styles() {
		assert_eq!(StyleSet::Legacy.len(), 7);
		assert_eq!(StyleSet::Legacy.get(0), Some(Style::GivenSurname));
		assert_eq!(StyleSet::Legacy.get(7), None);
	}

	#[test]
	fn declared_placeholders_match_templates() {
		for style in StyleSet::Canonical.styles() {
			let declared: Vec<&str> = style.placeholders().iter().map(|p| p.name()).collect();
			assert_eq!(template_tokens(style.template()), declared, "style {style}");
		}
	}

	#[test]
	fn rendering_substitutes_template_tokens() {
		let fields = full_fields();
		for style in StyleSet::Canonical.styles() {
			let mut expected = style.template().to_owned();
			for p in Placeholder::ALL {
				expected = expected.replace(&format!("{{{}}}", p.name()), fields.get(p).unwrap());
			}
			assert_eq!(style.render(&fields).unwrap(), expected);
		}
	}

	#[test]
	fn couple_titles_render() {
		let name = Style::CoupleTitles.render(&full_fields()).unwrap();
		assert_eq!(name, "Mr. and Mrs. John Smith");
	}

	#[test]
	fn family_styles_ignore_given_names() {
		let fields = NameFields { surname: Some("Smith".into()), ..Default::default() };
		assert_eq!(Style::SurnameFamily.render(&fields).unwrap(), "Smith Family");
		assert_eq!(Style::TheSurnameFamily.render(&fields).unwrap(), "The Smith Family");
	}

	#[test]
	fn missing_field_fails_loudly() {
		let fields = NameFields { given: Some("John".into()), ..Default::default() };
		let err = Style::GivenSurname.render(&fields).unwrap_err();
		match err {
			SynthError::MissingField { field, style } => {
				assert_eq!(field, "surname");
				assert_eq!(style, "{given} {surname}");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn style_set_parses_case_insensitively() {
		assert_eq!("Legacy".parse::<StyleSet>().unwrap(), StyleSet::Legacy);
		assert!("modern".parse::<StyleSet>().is_err());
	}
}
