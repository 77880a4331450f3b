//! Reviews

use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Errors raised while creating a review.
#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    /// Rating outside of the one to five star range.
    #[error("Rating {0} is out of range 1..=5")]
    RatingOutOfRange(u8),
}

/// A customer review shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: u32,
    author: String,
    rating: u8,
    text: String,
}

impl Review {
    /// Create a review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RatingOutOfRange`] when the rating is not between one and five.
    pub fn new(
        id: u32,
        author: impl Into<String>,
        rating: u8,
        text: impl Into<String>,
    ) -> Result<Self, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }

        Ok(Self {
            id,
            author: author.into(),
            rating,
            text: text.into(),
        })
    }

    /// Review identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Author display name
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Star rating
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Review body
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rating as a row of filled stars.
    pub fn stars(&self) -> String {
        "★".repeat(usize::from(self.rating))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_ratings_in_range() -> TestResult {
        let review = Review::new(1, "Анна К.", 5, "Прекрасный магазин!")?;

        assert_eq!(review.rating(), 5);
        assert_eq!(review.author(), "Анна К.");
        assert_eq!(review.stars(), "★★★★★");

        Ok(())
    }

    #[test]
    fn rejects_zero_and_six() {
        assert_eq!(
            Review::new(1, "A", 0, "x"),
            Err(ReviewError::RatingOutOfRange(0))
        );
        assert_eq!(
            Review::new(1, "A", 6, "x"),
            Err(ReviewError::RatingOutOfRange(6))
        );
    }
}
