//! The `available_packages_by_name` listing.

use scraper::{ElementRef, Html};

use super::*;
use crate::package::PackageListing;
use crate::Error::Parse;

impl PackageListing {
	/// Reads a listing out of a package row, a name cell holding a link and a description cell.
	pub fn from_row(row: ElementRef) -> crate::Result<Self> {
		let cells = elements_named(row, "td").collect::<Vec<_>>();
		let [name_cell, description_cell] = cells.as_slice() else {
			return Err(Parse(format!("catalogue row has {} cells, expected 2", cells.len())));
		};

		let link = elements_named(*name_cell, "a").next()
			.ok_or_else(|| Parse("catalogue row has no package link".to_string()))?;
		let url = link.value().attr("href")
			.ok_or_else(|| Parse(format!("catalogue link for {} has no target", text_of(link))))?;

		Ok(Self {
			name: text_of(link),
			url: url.to_string(),
			description: text_of(*description_cell),
		})
	}
}

/// Rows of the first table that carry an `id` are letter headings, every other row is a package.
fn is_package_row(row: &ElementRef) -> bool {
	row.value().id().map_or(true, str::is_empty)
}

/// Reads every package row of the catalogue listing.
///
/// # Errors
/// [`crate::Error::Parse`] if the page has no table or a package row is not shaped as expected.
pub fn parse_catalogue(html: &str) -> crate::Result<Vec<PackageListing>> {
	let document = Html::parse_document(html);
	let table = elements_named(document.root_element(), "table").next()
		.ok_or_else(|| Parse("catalogue page has no table".to_string()))?;

	let listings = elements_named(table, "tr")
		.filter(is_package_row)
		.map(PackageListing::from_row)
		.collect();
	listings
}
