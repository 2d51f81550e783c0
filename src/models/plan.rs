//! Seating plan (solution) model.
//!
//! A plan is the decoded output of one optimization run: accepted
//! diner/restaurant/day placements plus summary metrics and the advisor's
//! next-reservation suggestion.

use serde::{Deserialize, Serialize};

use super::ReservationSuggestion;

/// A diner seated at a restaurant on a specific day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Diner identity (email).
    pub diner: String,
    /// Restaurant name.
    pub restaurant: String,
    /// Day name (lowercase).
    pub day: String,
    /// Normalized preference score of this placement. Floored to 0.0 if
    /// the diner was placed at an excluded restaurant.
    pub preference_score: f64,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        diner: impl Into<String>,
        restaurant: impl Into<String>,
        day: impl Into<String>,
        preference_score: f64,
    ) -> Self {
        Self {
            diner: diner.into(),
            restaurant: restaurant.into(),
            day: day.into(),
            preference_score,
        }
    }
}

/// Result of one optimization run.
///
/// An infeasible model yields an empty assignment list; the suggestion is
/// computed either way so the caller always has a next step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanResult {
    /// Accepted placements, in diner × restaurant × day decode order.
    pub assignments: Vec<Assignment>,
    /// Sum of normalized preference scores over all placements.
    pub total_satisfaction: f64,
    /// Diner pairs co-located on two or more distinct days.
    pub repeated_pairings: usize,
    /// Next reservation to pursue, if any day still lacks capacity.
    pub suggestion: Option<ReservationSuggestion>,
}

impl PlanResult {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any placements were made.
    pub fn has_assignments(&self) -> bool {
        !self.assignments.is_empty()
    }

    /// Number of placements.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// All placements for a given day.
    pub fn assignments_for_day(&self, day: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.day == day).collect()
    }

    /// All placements for a given diner.
    pub fn assignments_for_diner(&self, diner: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.diner == diner).collect()
    }
}
