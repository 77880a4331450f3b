//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError},
    delivery::{DeliveryPolicy, FLAT_DELIVERY_FEE, FREE_DELIVERY_THRESHOLD},
    fixtures::{Fixture, FixtureError},
    info::{InfoEntry, InfoError, ShopInfo},
    products::{Product, ProductId},
    reviews::{Review, ReviewError},
    sections::{Section, UnknownSection},
    session::{Action, ActionParseError, SessionError},
    storefront::{Storefront, StorefrontError},
    summary::{CartSummary, SummaryError},
};
