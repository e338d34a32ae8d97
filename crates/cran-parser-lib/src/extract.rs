//! Reads package metadata out of catalogue markup.
//!
//! Detail pages lay their metadata out as two column tables, a label cell followed by a value cell.
//! Every field is read the same way: find the `td` whose text is exactly the label and read its next `td` sibling.
//! A [`Field`] pairs that label with the [`Shape`] of its value, and [`Field::extract`] is the only lookup there is.
//!
//! Absent fields are not errors, they produce the shape's empty default.

use scraper::ElementRef;

use crate::package::{PackageRef, ChannelUrls};

pub mod catalogue;
pub mod detail;

/// How the value cell of a field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
	/// Text of the cell.
	Text,
	/// Target of the first link in the cell.
	Link,
	/// Every link in the cell as a package reference.
	Refs,
	/// Cell reads `yes`.
	Flag,
	/// Cell is a `%Y-%m-%d` date.
	Date,
	/// Link targets zipped in order against the given channel names.
	/// Surplus keys or links are dropped.
	Channels(&'static [&'static str]),
}

/// A labelled row of a metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
	/// Exact text of the label cell, whitespace included.
	/// The catalogue separates the words of download labels with `&nbsp;`.
	pub label: &'static str,
	pub shape: Shape,
}

pub const WINDOWS_CHANNELS: &[&str] = &["r-devel", "r-release", "r-oldrel"];
pub const OSX_CHANNELS: &[&str] = &["r-release", "r-oldrel"];

pub const VERSION: Field = Field::new("Version:", Shape::Text);
pub const DEPENDS: Field = Field::new("Depends:", Shape::Refs);
pub const IMPORTS: Field = Field::new("Imports:", Shape::Refs);
pub const SUGGESTS: Field = Field::new("Suggests:", Shape::Refs);
pub const PUBLISHED: Field = Field::new("Published:", Shape::Date);
pub const AUTHOR: Field = Field::new("Author:", Shape::Text);
pub const MAINTAINER: Field = Field::new("Maintainer:", Shape::Text);
pub const LICENSE: Field = Field::new("License:", Shape::Text);
pub const NEEDS_COMPILATION: Field = Field::new("NeedsCompilation:", Shape::Flag);
pub const CITATION: Field = Field::new("Citation:", Shape::Link);

pub const REFERENCE_MANUAL: Field = Field::new(" Reference\u{a0}manual: ", Shape::Link);
pub const PACKAGE_SOURCE: Field = Field::new(" Package\u{a0}source: ", Shape::Link);
pub const OLD_SOURCES: Field = Field::new(" Old\u{a0}sources: ", Shape::Link);
pub const WINDOWS_BINARIES: Field = Field::new(" Windows\u{a0}binaries: ", Shape::Channels(WINDOWS_CHANNELS));
pub const OSX_BINARIES: Field = Field::new(" OS\u{a0}X\u{a0}binaries: ", Shape::Channels(OSX_CHANNELS));

/// Fields read from the details table.
pub const DETAILS_FIELDS: &[Field] = &[VERSION, DEPENDS, IMPORTS, SUGGESTS, PUBLISHED, AUTHOR, MAINTAINER, LICENSE, NEEDS_COMPILATION, CITATION];
/// Fields read from the downloads table.
pub const DOWNLOADS_FIELDS: &[Field] = &[REFERENCE_MANUAL, PACKAGE_SOURCE, OLD_SOURCES, WINDOWS_BINARIES, OSX_BINARIES];

/// The value read for a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	Text(String),
	Link(String),
	Refs(Vec<PackageRef>),
	Flag(bool),
	Date(Option<chrono::NaiveDate>),
	Channels(ChannelUrls),
}

impl FieldValue {
	/// Text or link target, empty for any other shape.
	pub fn into_string(self) -> String {
		match self {
			FieldValue::Text(s) | FieldValue::Link(s) => s,
			_ => String::new(),
		}
	}

	pub fn into_refs(self) -> Vec<PackageRef> {
		match self {
			FieldValue::Refs(v) => v,
			_ => Vec::new(),
		}
	}

	pub fn into_flag(self) -> bool {
		matches!(self, FieldValue::Flag(true))
	}

	pub fn into_date(self) -> Option<chrono::NaiveDate> {
		match self {
			FieldValue::Date(d) => d,
			_ => None,
		}
	}

	pub fn into_channels(self) -> ChannelUrls {
		match self {
			FieldValue::Channels(c) => c,
			_ => ChannelUrls::new(),
		}
	}
}

impl Field {
	pub const fn new(label: &'static str, shape: Shape) -> Self {
		Self { label, shape }
	}

	/// Value produced when the label is not present.
	pub fn default_value(&self) -> FieldValue {
		match self.shape {
			Shape::Text => FieldValue::Text(String::new()),
			Shape::Link => FieldValue::Link(String::new()),
			Shape::Refs => FieldValue::Refs(Vec::new()),
			Shape::Flag => FieldValue::Flag(false),
			Shape::Date => FieldValue::Date(None),
			Shape::Channels(_) => FieldValue::Channels(ChannelUrls::new()),
		}
	}

	/// Looks the field up in `table`, falling back to [`Field::default_value`].
	pub fn extract(&self, table: &LabelledTable) -> FieldValue {
		match table.value_cell(self.label) {
			Some(cell) => self.read(cell),
			None => {
				log::trace!("Field {:?} not present", self.label);
				self.default_value()
			}
		}
	}

	/// Same as [`Field::extract`] for a table that may not exist at all.
	pub fn extract_from(&self, table: Option<&LabelledTable>) -> FieldValue {
		table.map_or_else(|| self.default_value(), |t| self.extract(t))
	}

	fn read(&self, cell: ElementRef) -> FieldValue {
		match self.shape {
			Shape::Text => FieldValue::Text(text_of(cell)),
			Shape::Link => FieldValue::Link(links(cell).next().map(|(_, href)| href.to_string()).unwrap_or_default()),
			Shape::Refs => FieldValue::Refs(
				links(cell).map(|(a, href)| PackageRef::new(text_of(a), href)).collect()
			),
			Shape::Flag => FieldValue::Flag(text_of(cell).trim() == "yes"),
			Shape::Date => FieldValue::Date(
				chrono::NaiveDate::parse_from_str(text_of(cell).trim(), "%Y-%m-%d")
					.map_err(|e| log::warn!("Unreadable date for {:?}: {}", self.label, e))
					.ok()
			),
			Shape::Channels(keys) => FieldValue::Channels(
				keys.iter()
					.zip(links(cell))
					.map(|(key, (_, href))| (key.to_string(), href.to_string()))
					.collect()
			),
		}
	}
}

/// A two column label/value table.
#[derive(Debug, Clone, Copy)]
pub struct LabelledTable<'a> {
	table: ElementRef<'a>,
}

impl<'a> LabelledTable<'a> {
	pub fn new(table: ElementRef<'a>) -> Self {
		Self { table }
	}

	/// The `td` following the first `td` whose text is exactly `label`.
	pub fn value_cell(&self, label: &str) -> Option<ElementRef<'a>> {
		let label_cell = elements_named(self.table, "td").find(|td| text_of(*td) == label)?;
		label_cell.next_siblings()
			.filter_map(ElementRef::wrap)
			.find(|e| e.value().name() == "td")
	}
}

/// `root` and its descendant elements with tag `name`, in document order.
pub(crate) fn elements_named<'a>(root: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
	root.descendants()
		.filter_map(ElementRef::wrap)
		.filter(move |e| e.value().name() == name)
}

pub(crate) fn text_of(element: ElementRef) -> String {
	element.text().collect()
}

/// Anchors below `cell` that carry an `href`.
fn links<'a>(cell: ElementRef<'a>) -> impl Iterator<Item = (ElementRef<'a>, &'a str)> + 'a {
	elements_named(cell, "a").filter_map(|a| a.value().attr("href").map(|href| (a, href)))
}
