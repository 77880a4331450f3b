//! Shop information
//!
//! Static content shown behind the page sections: the about cards, delivery
//! terms, payment methods and contact details. Catalog and review sections are
//! backed by the catalog and reviews instead.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::sections::Section;

/// Errors raised while building shop information.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InfoError {
    /// The section already has content.
    #[error("Section {0} is defined more than once")]
    DuplicateSection(Section),

    /// The section's content lives in the catalog or reviews.
    #[error("Section {0} is backed by the catalog or reviews and takes no info entries")]
    ReservedSection(Section),

    /// An entry has an empty title.
    #[error("Section {0} has an entry with an empty title")]
    EmptyTitle(Section),
}

/// A titled piece of information, such as a delivery zone and its price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    title: String,
    text: String,
}

impl InfoEntry {
    /// Create an entry.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Entry heading
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entry body
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Content for the informational sections of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopInfo {
    sections: FxHashMap<Section, Vec<InfoEntry>>,
}

impl ShopInfo {
    /// Create empty shop information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entries shown for a section.
    ///
    /// # Errors
    ///
    /// Returns an [`InfoError`] if the section already has entries, is the
    /// catalog or reviews section, or an entry has a blank title.
    pub fn insert(&mut self, section: Section, entries: Vec<InfoEntry>) -> Result<(), InfoError> {
        if matches!(section, Section::Catalog | Section::Reviews) {
            return Err(InfoError::ReservedSection(section));
        }

        if self.sections.contains_key(&section) {
            return Err(InfoError::DuplicateSection(section));
        }

        if entries.iter().any(|entry| entry.title.trim().is_empty()) {
            return Err(InfoError::EmptyTitle(section));
        }

        self.sections.insert(section, entries);

        Ok(())
    }

    /// Entries for a section, empty when it has none.
    pub fn entries(&self, section: Section) -> &[InfoEntry] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of sections with content.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if no section has content.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
