//! Catalog
//!
//! The shop's immutable product list. Every product has a unique identifier and
//! all products share one currency.

use std::slice;

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an identifier.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product's currency differs from the catalog currency (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog with the given products, in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if an identifier repeats or a product is priced
    /// in a different currency.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.push(product)?;
        }

        Ok(catalog)
    }

    fn push(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        let product_currency = product.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        self.index.insert(product.id, self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Look up a product by identifier.
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        let idx = *self.index.get(&id)?;

        self.products.get(idx)
    }

    /// Distinct category labels, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Products in the given category, in display order.
    pub fn in_category<'c>(&'c self, category: &'c str) -> impl Iterator<Item = &'c Product<'a>> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Iterate over products in display order.
    pub fn iter(&self) -> slice::Iter<'_, Product<'a>> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all products are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl<'b, 'a> IntoIterator for &'b Catalog<'a> {
    type Item = &'b Product<'a>;
    type IntoIter = slice::Iter<'b, Product<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{RUB, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn products() -> [Product<'static>; 4] {
        [
            Product::new(1, "Мягкий плед", "Текстиль", Money::from_major(2990, RUB)),
            Product::new(2, "Керамическая ваза", "Декор", Money::from_major(1590, RUB)),
            Product::new(3, "Ароматическая свеча", "Декор", Money::from_major(890, RUB)),
            Product::new(4, "Декоративная подушка", "Текстиль", Money::from_major(1290, RUB)),
        ]
    }

    #[test]
    fn lookup_by_id() -> TestResult {
        let catalog = Catalog::with_products(products(), RUB)?;

        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get(ProductId::new(3)).map(|p| p.name.as_str()),
            Some("Ароматическая свеча")
        );
        assert!(catalog.get(ProductId::new(99)).is_none());

        Ok(())
    }

    #[test]
    fn categories_in_first_seen_order() -> TestResult {
        let catalog = Catalog::with_products(products(), RUB)?;

        assert_eq!(catalog.categories(), vec!["Текстиль", "Декор"]);

        Ok(())
    }

    #[test]
    fn filter_by_category() -> TestResult {
        let catalog = Catalog::with_products(products(), RUB)?;

        let ids: Vec<u32> = catalog
            .in_category("Декор")
            .map(|product| product.id.get())
            .collect();

        assert_eq!(ids, vec![2, 3]);
        assert_eq!(catalog.in_category("Растения").count(), 0);

        Ok(())
    }

    #[test]
    fn rejects_duplicate_ids() {
        let duplicate = [
            Product::new(1, "A", "X", Money::from_major(1, RUB)),
            Product::new(1, "B", "X", Money::from_major(2, RUB)),
        ];

        let result = Catalog::with_products(duplicate, RUB);

        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)));
    }

    #[test]
    fn rejects_mixed_currencies() {
        let mixed = [
            Product::new(1, "A", "X", Money::from_major(1, RUB)),
            Product::new(2, "B", "X", Money::from_major(2, USD)),
        ];

        let result = Catalog::with_products(mixed, RUB);

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch(_, "USD", "RUB"))
        ));
    }

    #[test]
    fn iterates_in_display_order() -> TestResult {
        let catalog = Catalog::with_products(products(), RUB)?;

        let names: Vec<&str> = (&catalog)
            .into_iter()
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(names.first(), Some(&"Мягкий плед"));
        assert_eq!(names.last(), Some(&"Декоративная подушка"));

        Ok(())
    }
}
