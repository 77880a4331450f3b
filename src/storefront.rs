//! Storefront
//!
//! A single shopper's view of the shop: the catalog, reviews, their cart and
//! the page section they are looking at. Every user action is one synchronous
//! state transition on this value.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::Catalog,
    fixtures::Fixture,
    info::ShopInfo,
    products::ProductId,
    reviews::Review,
    sections::Section,
    summary::CartSummary,
};

/// Errors raised by storefront actions.
#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    /// The product is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Cart rejected the product.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Storefront session
#[derive(Debug, Clone)]
pub struct Storefront<'a> {
    store_name: String,
    catalog: Catalog<'a>,
    reviews: Vec<Review>,
    info: ShopInfo,
    cart: Cart<'a>,
    active_section: Section,
}

impl<'a> Storefront<'a> {
    /// Open a session with an empty cart on the landing section.
    pub fn new(store_name: impl Into<String>, catalog: Catalog<'a>, reviews: Vec<Review>) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            store_name: store_name.into(),
            catalog,
            reviews,
            info: ShopInfo::default(),
            cart,
            active_section: Section::default(),
        }
    }

    /// Attach content for the informational sections.
    #[must_use]
    pub fn with_info(mut self, info: ShopInfo) -> Self {
        self.info = info;
        self
    }

    /// Open a session from a loaded fixture.
    pub fn from_fixture(fixture: Fixture<'a>) -> Self {
        let (store_name, catalog, reviews, info) = fixture.into_parts();

        Self::new(store_name, catalog, reviews).with_info(info)
    }

    /// Add one unit of a catalog product to the cart, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] if the id is not in the catalog.
    pub fn add_product(&mut self, product_id: ProductId) -> Result<u32, StorefrontError> {
        let Some(product) = self.catalog.get(product_id) else {
            warn!(%product_id, "attempted to add unknown product");
            return Err(StorefrontError::UnknownProduct(product_id));
        };

        Ok(self.cart.add_to_cart(product)?)
    }

    /// Remove a product's line from the cart.
    pub fn remove_product(&mut self, product_id: ProductId) {
        self.cart.remove_from_cart(product_id);
    }

    /// Set a product's quantity; zero or less removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
    }

    /// Add one to an existing line.
    pub fn increment(&mut self, product_id: ProductId) {
        self.step_quantity(product_id, 1);
    }

    /// Take one from an existing line, removing it when it reaches zero.
    pub fn decrement(&mut self, product_id: ProductId) {
        self.step_quantity(product_id, -1);
    }

    fn step_quantity(&mut self, product_id: ProductId, delta: i64) {
        if let Some(quantity) = self.cart.line(product_id).map(CartLine::quantity) {
            self.cart
                .update_quantity(product_id, i64::from(quantity) + delta);
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Jump to a page section, making it the active one.
    pub fn navigate(&mut self, section: Section) {
        debug!(from = %self.active_section, to = %section, "navigating");

        self.active_section = section;
    }

    /// Section currently in view.
    pub fn active_section(&self) -> Section {
        self.active_section
    }

    /// Cart drawer figures.
    pub fn summary(&self) -> CartSummary<'a> {
        CartSummary::from_cart(&self.cart)
    }

    /// Shop display name.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Product catalog.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Customer reviews.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Content of the informational sections.
    pub fn info(&self) -> &ShopInfo {
        &self.info
    }

    /// The session's cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }
}
