//! Fixtures
//!
//! Loads the storefront's catalog and reviews from YAML. A fixture describing
//! the homeware shop is embedded in the crate and used when no file is given.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    info::{InfoEntry, InfoError, ShopInfo},
    products::Product,
    reviews::{Review, ReviewError},
    sections::{Section, UnknownSection},
};

pub mod products;

use products::{ProductFixture, parse_price};

const BUILTIN_FIXTURE: &str = include_str!("../../fixtures/catalog/homeware.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Fixture declares no products, so currency is unknown
    #[error("No products in fixture; currency unknown")]
    NoProducts,

    /// Products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid review data
    #[error("Invalid review {0}: {1}")]
    Review(u32, ReviewError),

    /// Info block names an unknown section
    #[error(transparent)]
    Section(#[from] UnknownSection),

    /// Invalid section info
    #[error(transparent)]
    Info(#[from] InfoError),
}

/// Wrapper for a storefront fixture file
#[derive(Debug, Deserialize)]
struct StorefrontFixture {
    store: String,
    products: Vec<ProductFixture>,
    #[serde(default)]
    reviews: Vec<ReviewFixture>,
    #[serde(default)]
    info: Vec<SectionInfoFixture>,
}

/// Review Fixture
#[derive(Debug, Deserialize)]
struct ReviewFixture {
    id: u32,
    author: String,
    rating: u8,
    text: String,
}

/// Section Info Fixture
#[derive(Debug, Deserialize)]
struct SectionInfoFixture {
    section: String,
    entries: Vec<InfoEntryFixture>,
}

/// Info Entry Fixture
#[derive(Debug, Deserialize)]
struct InfoEntryFixture {
    title: String,
    #[serde(default)]
    text: String,
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture<'a> {
    store_name: String,
    catalog: Catalog<'a>,
    reviews: Vec<Review>,
    info: ShopInfo,
}

impl Fixture<'static> {
    /// Load the embedded homeware shop fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture is invalid.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::from_yaml(BUILTIN_FIXTURE)
    }

    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path.as_ref())?;

        Self::from_yaml(&contents)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price is invalid, the
    /// products do not form a valid catalog, or a review rating is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: StorefrontFixture = serde_norway::from_str(yaml)?;

        let first = fixture.products.first().ok_or(FixtureError::NoProducts)?;
        let (_minor_units, currency) = parse_price(&first.price)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::with_products(products, currency)?;

        let reviews = fixture
            .reviews
            .into_iter()
            .map(|review| {
                let id = review.id;

                Review::new(id, review.author, review.rating, review.text)
                    .map_err(|err| FixtureError::Review(id, err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut shop_info = ShopInfo::new();

        for block in fixture.info {
            let section: Section = block.section.parse()?;
            let entries = block
                .entries
                .into_iter()
                .map(|entry| InfoEntry::new(entry.title, entry.text))
                .collect();

            shop_info.insert(section, entries)?;
        }

        info!(
            store = %fixture.store,
            products = catalog.len(),
            reviews = reviews.len(),
            info_sections = shop_info.len(),
            currency = currency.iso_alpha_code,
            "loaded storefront fixture"
        );

        Ok(Fixture {
            store_name: fixture.store,
            catalog,
            reviews,
            info: shop_info,
        })
    }
}

impl<'a> Fixture<'a> {
    /// Shop display name.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Product catalog.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Customer reviews, in display order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Content of the informational sections.
    pub fn info(&self) -> &ShopInfo {
        &self.info
    }

    /// Split the fixture into its parts.
    pub fn into_parts(self) -> (String, Catalog<'a>, Vec<Review>, ShopInfo) {
        (self.store_name, self.catalog, self.reviews, self.info)
    }
}
