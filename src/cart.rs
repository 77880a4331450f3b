//! Cart
//!
//! The session's shopping cart: an insertion-ordered list of lines, at most one
//! per product, each with a quantity of at least one.

use std::slice;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    delivery::DeliveryPolicy,
    products::{Product, ProductId},
};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Delivery policy amounts are not in the cart currency (policy currency, cart currency).
    #[error("Delivery policy has currency {0}, but cart has currency {1}")]
    DeliveryCurrencyMismatch(&'static str, &'static str),
}

/// A product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: Product<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    fn new(product: Product<'a>) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product on this line.
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Identifier of the product on this line.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(self.line_total_minor(), self.product.currency())
    }

    fn line_total_minor(&self) -> i64 {
        self.product
            .price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity))
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: SmallVec<[CartLine<'a>; 8]>,
    currency: &'static Currency,
    delivery: DeliveryPolicy<'a>,
}

impl<'a> Cart<'a> {
    /// Create an empty cart using the standard delivery policy for `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
            delivery: DeliveryPolicy::for_currency(currency),
        }
    }

    /// Create an empty cart with a custom delivery policy.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::DeliveryCurrencyMismatch`] if the policy's
    /// threshold or fee is not in `currency`.
    pub fn with_delivery(
        currency: &'static Currency,
        delivery: DeliveryPolicy<'a>,
    ) -> Result<Self, CartError> {
        for amount in [delivery.free_threshold(), delivery.flat_fee()] {
            let policy_currency = amount.currency();

            if policy_currency != currency {
                return Err(CartError::DeliveryCurrencyMismatch(
                    policy_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }

        Ok(Cart {
            lines: SmallVec::new(),
            currency,
            delivery,
        })
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// Increments the existing line for the product, or appends a new line with
    /// a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the product is priced in a
    /// different currency to the cart.
    pub fn add_to_cart(&mut self, product: &Product<'a>) -> Result<u32, CartError> {
        let product_currency = product.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let quantity = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine::new(product.clone()));
            1
        };

        debug!(product_id = %product.id, quantity, "added product to cart");

        Ok(quantity)
    }

    /// Remove the line for `product_id`, if there is one.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id() != product_id);

        if self.lines.len() != before {
            debug!(%product_id, "removed product from cart");
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Products not already in
    /// the cart are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or_else(|_err| {
            debug!(%product_id, requested = quantity, "clamped cart quantity");
            u32::MAX
        });

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        {
            line.quantity = quantity;

            debug!(%product_id, quantity, "updated cart quantity");
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price multiplied by quantity over all lines.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.line_total_minor()));

        Money::from_minor(minor, self.currency)
    }

    /// Delivery fee for the current subtotal.
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery.fee(self.subtotal())
    }

    /// Subtotal plus delivery fee.
    pub fn total(&self) -> Money<'a, Currency> {
        let subtotal = self.subtotal();
        let fee = self.delivery.fee(subtotal);

        Money::from_minor(
            subtotal
                .to_minor_units()
                .saturating_add(fee.to_minor_units()),
            self.currency,
        )
    }

    /// Amount still needed for free delivery, if any.
    pub fn remaining_for_free_delivery(&self) -> Option<Money<'a, Currency>> {
        self.delivery.remaining_for_free_delivery(self.subtotal())
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Look up the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine<'a>> {
        self.lines
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    /// Check whether the cart has a line for a product.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, CartLine<'a>> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Delivery policy applied to this cart.
    pub fn delivery(&self) -> &DeliveryPolicy<'a> {
        &self.delivery
    }
}

impl<'b, 'a> IntoIterator for &'b Cart<'a> {
    type Item = &'b CartLine<'a>;
    type IntoIter = slice::Iter<'b, CartLine<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, RUB};
    use testresult::TestResult;

    use super::*;

    fn pled() -> Product<'static> {
        Product::new(1, "Мягкий плед", "Текстиль", Money::from_major(2990, RUB))
    }

    fn candle() -> Product<'static> {
        Product::new(3, "Ароматическая свеча", "Декор", Money::from_major(890, RUB))
    }

    fn vase() -> Product<'static> {
        Product::new(2, "Керамическая ваза", "Декор", Money::from_major(1590, RUB))
    }

    fn rub(amount: i64) -> Money<'static, Currency> {
        Money::from_major(amount, RUB)
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(RUB);

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), rub(0));
        assert_eq!(cart.currency(), RUB);
    }

    #[test]
    fn adding_same_product_twice_increments_quantity() -> TestResult {
        let mut cart = Cart::new(RUB);

        assert_eq!(cart.add_to_cart(&pled())?, 1);
        assert_eq!(cart.add_to_cart(&pled())?, 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ProductId::new(1)).map(CartLine::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&candle())?;
        cart.add_to_cart(&pled())?;
        cart.add_to_cart(&candle())?;

        let ids: Vec<u32> = cart.iter().map(|line| line.product_id().get()).collect();

        assert_eq!(ids, vec![3, 1]);

        Ok(())
    }

    #[test]
    fn add_rejects_foreign_currency() {
        let mut cart = Cart::new(RUB);
        let product = Product::new(9, "Teapot", "Kitchen", Money::from_major(20, GBP));

        let result = cart.add_to_cart(&product);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch(ProductId::new(9), "GBP", "RUB"))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_deletes_line() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.add_to_cart(&candle())?;
        cart.remove_from_cart(ProductId::new(1));

        assert!(!cart.contains(ProductId::new(1)));
        assert!(cart.contains(ProductId::new(3)));

        Ok(())
    }

    #[test]
    fn remove_absent_product_is_noop() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        let before = cart.lines().to_vec();

        cart.remove_from_cart(ProductId::new(42));

        assert_eq!(cart.lines(), before.as_slice());

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.update_quantity(ProductId::new(1), 0);

        assert!(!cart.contains(ProductId::new(1)));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_negative_removes_line() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.update_quantity(ProductId::new(1), -3);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_sets_existing_line() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&candle())?;
        cart.update_quantity(ProductId::new(3), 5);

        assert_eq!(cart.line(ProductId::new(3)).map(CartLine::quantity), Some(5));
        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn update_quantity_never_creates_line() {
        let mut cart = Cart::new(RUB);

        cart.update_quantity(ProductId::new(3), 4);

        assert!(cart.is_empty());
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.add_to_cart(&candle())?;
        cart.add_to_cart(&candle())?;

        assert_eq!(cart.subtotal(), rub(4770));
        assert_eq!(
            cart.line(ProductId::new(3)).map(CartLine::line_total),
            Some(rub(1780))
        );

        Ok(())
    }

    #[test]
    fn total_includes_fee_below_threshold() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.add_to_cart(&candle())?;
        cart.add_to_cart(&candle())?;

        assert_eq!(cart.delivery_fee(), rub(300));
        assert_eq!(cart.total(), rub(5070));
        assert_eq!(cart.remaining_for_free_delivery(), Some(rub(230)));

        Ok(())
    }

    #[test]
    fn total_waives_fee_above_threshold() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.add_to_cart(&pled())?;

        assert_eq!(cart.subtotal(), rub(5980));
        assert_eq!(cart.delivery_fee(), rub(0));
        assert_eq!(cart.total(), rub(5980));
        assert_eq!(cart.remaining_for_free_delivery(), None);

        Ok(())
    }

    #[test]
    fn fee_charged_at_exact_threshold() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&vase())?;
        cart.add_to_cart(&candle())?;
        cart.update_quantity(ProductId::new(2), 2);
        cart.update_quantity(ProductId::new(3), 2);

        // 1590 * 2 + 890 * 2 = 4960
        assert_eq!(cart.subtotal(), rub(4960));

        let exact = Product::new(7, "Подставка", "Декор", rub(40));
        cart.add_to_cart(&exact)?;

        assert_eq!(cart.subtotal(), rub(5000));
        assert_eq!(cart.delivery_fee(), rub(300));
        assert_eq!(cart.total(), rub(5300));

        Ok(())
    }

    #[test]
    fn total_is_subtotal_plus_fee_through_mutations() -> TestResult {
        let mut cart = Cart::new(RUB);
        let products = [pled(), candle(), vase()];

        for (step, product) in products.iter().cycle().take(9).enumerate() {
            cart.add_to_cart(product)?;

            if step % 4 == 3 {
                cart.update_quantity(product.id, 1);
            }

            let expected = cart.subtotal().to_minor_units() + cart.delivery_fee().to_minor_units();

            assert_eq!(cart.total().to_minor_units(), expected);
        }

        Ok(())
    }

    #[test]
    fn custom_delivery_policy() -> TestResult {
        let policy = DeliveryPolicy::new(rub(1000), rub(150));
        let mut cart = Cart::with_delivery(RUB, policy)?;

        cart.add_to_cart(&candle())?;
        assert_eq!(cart.delivery_fee(), rub(150));

        cart.add_to_cart(&candle())?;
        assert_eq!(cart.delivery_fee(), rub(0));

        Ok(())
    }

    #[test]
    fn with_delivery_rejects_foreign_policy() {
        let result = Cart::with_delivery(RUB, DeliveryPolicy::for_currency(GBP));

        assert!(matches!(
            result,
            Err(CartError::DeliveryCurrencyMismatch("GBP", "RUB"))
        ));
    }

    #[test]
    fn with_delivery_rejects_mixed_policy() {
        let policy = DeliveryPolicy::new(rub(5000), Money::from_major(3, GBP));

        assert!(matches!(
            Cart::with_delivery(RUB, policy),
            Err(CartError::DeliveryCurrencyMismatch("GBP", "RUB"))
        ));
    }

    #[test]
    fn update_quantity_clamps_huge_values() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&candle())?;
        cart.update_quantity(ProductId::new(3), i64::MAX);

        assert_eq!(
            cart.line(ProductId::new(3)).map(CartLine::quantity),
            Some(u32::MAX)
        );
        assert_eq!(cart.item_count(), u64::from(u32::MAX));

        let expected = cart.subtotal().to_minor_units() + cart.delivery_fee().to_minor_units();

        assert_eq!(cart.total().to_minor_units(), expected);

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(RUB);

        cart.add_to_cart(&pled())?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), rub(300));

        Ok(())
    }
}
