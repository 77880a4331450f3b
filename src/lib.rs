//! Storefront
//!
//! Cart state management for a single-page home-goods storefront: an immutable
//! product catalog, customer reviews, page sections with their shop
//! information, and a shopping cart with subtotal, delivery-fee and total
//! computation.

pub mod cart;
pub mod catalog;
pub mod delivery;
pub mod fixtures;
pub mod info;
pub mod listing;
pub mod prelude;
pub mod products;
pub mod reviews;
pub mod sections;
pub mod session;
pub mod storefront;
pub mod summary;
