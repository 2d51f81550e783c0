//! Diner (participant) model.
//!
//! A diner is identified by email and carries one rating per restaurant.
//! A rating of `None` marks a hard exclusion: the diner must never be
//! seated at that restaurant (dietary restriction, allergy, boycott).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw restaurant rating on a four-point scale.
///
/// Higher is more preferred. "Can't eat here" is not a rating — it is
/// modeled as the absence of one (`Option<Rating>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    /// Must-have (raw score 4).
    MustHave,
    /// Want (raw score 3).
    Want,
    /// Neutral (raw score 2).
    Neutral,
    /// Don't-want (raw score 1).
    DontWant,
}

impl Rating {
    /// Raw numeric score used for normalization.
    #[inline]
    pub fn score(self) -> f64 {
        match self {
            Rating::MustHave => 4.0,
            Rating::Want => 3.0,
            Rating::Neutral => 2.0,
            Rating::DontWant => 1.0,
        }
    }

    /// Short display label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Rating::MustHave => "Have to",
            Rating::Want => "Want",
            Rating::Neutral => "Neutral",
            Rating::DontWant => "Don't want",
        }
    }
}

/// A participant with per-restaurant ratings.
///
/// Immutable once parsed. The preference map holds `None` for hard
/// exclusions; a restaurant absent from the map is also treated as
/// excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diner {
    /// Unique identity (an email address).
    pub email: String,
    /// Restaurant name → rating. `None` = can't eat there.
    pub preferences: HashMap<String, Option<Rating>>,
}

impl Diner {
    /// Creates a diner with no recorded preferences.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            preferences: HashMap::new(),
        }
    }

    /// Records a preference. `None` marks a hard exclusion.
    pub fn with_preference(
        mut self,
        restaurant: impl Into<String>,
        rating: Option<Rating>,
    ) -> Self {
        self.preferences.insert(restaurant.into(), rating);
        self
    }

    /// The rating for a restaurant, `None` if excluded or unrated.
    pub fn rating(&self, restaurant: &str) -> Option<Rating> {
        self.preferences.get(restaurant).copied().flatten()
    }

    /// Whether the diner may be seated at this restaurant.
    #[inline]
    pub fn can_eat(&self, restaurant: &str) -> bool {
        self.rating(restaurant).is_some()
    }

    /// Display name: the local part of the email.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_scores() {
        assert_eq!(Rating::MustHave.score(), 4.0);
        assert_eq!(Rating::Want.score(), 3.0);
        assert_eq!(Rating::Neutral.score(), 2.0);
        assert_eq!(Rating::DontWant.score(), 1.0);
    }

    #[test]
    fn test_diner_builder() {
        let diner = Diner::new("ada@example.com")
            .with_preference("Bistro", Some(Rating::Want))
            .with_preference("Oyster Bar", None);

        assert_eq!(diner.email, "ada@example.com");
        assert_eq!(diner.rating("Bistro"), Some(Rating::Want));
        assert!(diner.can_eat("Bistro"));
        assert!(!diner.can_eat("Oyster Bar"));
    }

    #[test]
    fn test_unrated_restaurant_is_excluded() {
        let diner = Diner::new("ada@example.com");
        assert_eq!(diner.rating("Nowhere"), None);
        assert!(!diner.can_eat("Nowhere"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Diner::new("ada@example.com").display_name(), "ada");
        assert_eq!(Diner::new("no-at-sign").display_name(), "no-at-sign");
    }
}
