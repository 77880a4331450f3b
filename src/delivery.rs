//! Delivery

use rusty_money::{
    Money,
    iso::{Currency, RUB},
};

/// Subtotal above which delivery is free, in major units.
pub const FREE_DELIVERY_THRESHOLD: i64 = 5000;

/// Flat delivery fee charged at or below the threshold, in major units.
pub const FLAT_DELIVERY_FEE: i64 = 300;

/// Delivery pricing: a flat fee, waived once the subtotal exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    flat_fee: Money<'a, Currency>,
}

impl<'a> DeliveryPolicy<'a> {
    /// Create a policy from an explicit threshold and fee.
    pub fn new(free_threshold: Money<'a, Currency>, flat_fee: Money<'a, Currency>) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// The shop's standard policy expressed in the given currency.
    pub fn for_currency(currency: &'a Currency) -> Self {
        Self::new(
            Money::from_major(FREE_DELIVERY_THRESHOLD, currency),
            Money::from_major(FLAT_DELIVERY_FEE, currency),
        )
    }

    /// Subtotal that must be exceeded for free delivery.
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Fee charged when delivery is not free.
    pub fn flat_fee(&self) -> Money<'a, Currency> {
        self.flat_fee
    }

    /// Delivery fee for the given subtotal.
    ///
    /// Free only when the subtotal is strictly greater than the threshold.
    pub fn fee(&self, subtotal: Money<'a, Currency>) -> Money<'a, Currency> {
        if subtotal.to_minor_units() > self.free_threshold.to_minor_units() {
            Money::from_minor(0, subtotal.currency())
        } else {
            self.flat_fee
        }
    }

    /// How much more must be added to reach the free-delivery threshold.
    ///
    /// `None` for an empty cart and once the threshold is reached.
    pub fn remaining_for_free_delivery(
        &self,
        subtotal: Money<'a, Currency>,
    ) -> Option<Money<'a, Currency>> {
        let subtotal_minor = subtotal.to_minor_units();
        let threshold_minor = self.free_threshold.to_minor_units();

        (subtotal_minor > 0 && subtotal_minor < threshold_minor)
            .then(|| Money::from_minor(threshold_minor - subtotal_minor, subtotal.currency()))
    }
}

impl Default for DeliveryPolicy<'static> {
    fn default() -> Self {
        Self::for_currency(RUB)
    }
}
