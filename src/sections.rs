//! Page sections

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error returned when parsing an unknown section anchor.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown section: {0}")]
pub struct UnknownSection(pub String);

/// An anchored block of the storefront page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Landing banner
    #[default]
    Hero,
    /// About the shop
    About,
    /// Product catalog
    Catalog,
    /// Delivery terms
    Delivery,
    /// Payment methods
    Payment,
    /// Customer reviews
    Reviews,
    /// Contact details
    Contacts,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 7] = [
        Section::Hero,
        Section::About,
        Section::Catalog,
        Section::Delivery,
        Section::Payment,
        Section::Reviews,
        Section::Contacts,
    ];

    /// Anchor id used for navigation.
    pub const fn id(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::Catalog => "catalog",
            Section::Delivery => "delivery",
            Section::Payment => "payment",
            Section::Reviews => "reviews",
            Section::Contacts => "contacts",
        }
    }

    /// Heading shown for the section.
    pub const fn title(self) -> &'static str {
        match self {
            Section::Hero => "Всё для уюта вашего дома",
            Section::About => "О магазине",
            Section::Catalog => "Каталог товаров",
            Section::Delivery => "Доставка",
            Section::Payment => "Оплата",
            Section::Reviews => "Отзывы покупателей",
            Section::Contacts => "Контакты",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchor = s.trim().trim_start_matches('#');

        Section::ALL
            .into_iter()
            .find(|section| section.id().eq_ignore_ascii_case(anchor))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
