//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a product identifier from its raw value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category label, e.g. "Декор"
    pub category: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Image reference (URL)
    pub image: String,

    /// Short description
    pub description: String,
}

impl<'a> Product<'a> {
    /// Create a product with an empty image reference and description.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category: category.into(),
            price,
            image: String::new(),
            description: String::new(),
        }
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Currency the product is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.price.currency()
    }
}
