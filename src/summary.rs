//! Cart summary
//!
//! Figures shown in the cart drawer, and a plain-text rendering of the cart.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::Cart;

/// Errors that can occur when writing a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Totals for a cart at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary<'a> {
    /// Total units across all lines (the cart badge).
    pub item_count: u64,

    /// Number of distinct lines.
    pub line_count: usize,

    /// Sum of line totals.
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee for the subtotal.
    pub delivery_fee: Money<'a, Currency>,

    /// Subtotal plus delivery fee.
    pub total: Money<'a, Currency>,

    /// Amount left to add for free delivery, if any.
    pub remaining_for_free_delivery: Option<Money<'a, Currency>>,
}

impl<'a> CartSummary<'a> {
    /// Summarise a cart.
    pub fn from_cart(cart: &Cart<'a>) -> Self {
        Self {
            item_count: cart.item_count(),
            line_count: cart.len(),
            subtotal: cart.subtotal(),
            delivery_fee: cart.delivery_fee(),
            total: cart.total(),
            remaining_for_free_delivery: cart.remaining_for_free_delivery(),
        }
    }

    /// Whether delivery is free for this cart.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.to_minor_units() == 0
    }

    /// Writes the cart lines and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), SummaryError> {
        if cart.is_empty() {
            writeln!(out, "Your cart is empty. Add products from the catalog.")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Price", "Qty", "Line Total"]);

        for line in cart {
            let product = line.product();

            builder.push_record([
                product.id.to_string(),
                product.name.clone(),
                product.price.to_string(),
                line.quantity().to_string(),
                line.line_total().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        let delivery = if self.has_free_delivery() {
            "Free".to_string()
        } else {
            self.delivery_fee.to_string()
        };

        writeln!(out, " Items:    {}", self.item_count)?;
        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Delivery: {delivery}")?;

        if let Some(remaining) = self.remaining_for_free_delivery {
            writeln!(out, " Add {remaining} more for free delivery")?;
        }

        writeln!(out, " \x1b[1mTotal:\x1b[0m    {}", self.total)?;

        Ok(())
    }
}
