//! Listings
//!
//! Plain-text renderings of the catalog, reviews, page sections and the
//! content behind each section.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    info::InfoEntry, products::Product, reviews::Review, sections::Section,
    storefront::Storefront,
};

/// Writes a product table.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_products<'p, 'a: 'p>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'p Product<'a>>,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Category", "Price", "Description"]);

    let mut rows = 0_usize;

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            product.description.clone(),
        ]);

        rows += 1;
    }

    if rows == 0 {
        return writeln!(out, "No products found.");
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")
}

/// Writes reviews, one block per review.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_reviews(mut out: impl io::Write, reviews: &[Review]) -> io::Result<()> {
    for review in reviews {
        writeln!(out, "{} {}", review.stars(), review.author())?;
        writeln!(out, "  {}\n", review.text())?;
    }

    Ok(())
}

/// Writes the page sections, marking the active one.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_sections(mut out: impl io::Write, active: Section) -> io::Result<()> {
    for section in Section::ALL {
        let marker = if section == active { '>' } else { ' ' };

        writeln!(out, "{marker} #{:<9} {}", section.id(), section.title())?;
    }

    Ok(())
}

/// Writes informational entries as a two-column table.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_info(mut out: impl io::Write, entries: &[InfoEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "Nothing here yet.");
    }

    let mut builder = Builder::default();

    for entry in entries {
        builder.push_record([entry.title(), entry.text()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(0..1), Color::BOLD);

    writeln!(out, "{table}")
}

/// Writes a section's heading followed by its content.
///
/// The catalog and reviews sections show the storefront's products and
/// reviews; the others show their info entries.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_section(
    mut out: impl io::Write,
    storefront: &Storefront<'_>,
    section: Section,
) -> io::Result<()> {
    writeln!(out, "{}", section.title())?;

    match section {
        Section::Catalog => write_products(out, storefront.catalog()),
        Section::Reviews => write_reviews(out, storefront.reviews()),
        _ => write_info(out, storefront.info().entries(section)),
    }
}
