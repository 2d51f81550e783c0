//! Preference normalization.
//!
//! Raw four-point ratings are not comparable across diners: one person's
//! "Neutral" is another's "Want". Per-diner z-scoring puts every diner on
//! a common signed scale before the scores enter the objective.
//!
//! Hard exclusions ("can't eat here") are carried as a tagged `None`, not
//! a floating-point sentinel, so they can never leak into arithmetic.
//!
//! # Reference
//! Freedman et al. (2007), "Statistics", Ch. 5 (standard units)

use crate::models::Diner;

/// Diner × restaurant matrix of normalized preference scores.
///
/// For every diner with at least one ratable restaurant, the non-excluded
/// entries of that diner's row have mean 0 and sample standard deviation 1
/// (with stdev pinned to 1.0 for single-rating and zero-variance rows).
/// Excluded entries are `None`. A diner who excludes everything gets an
/// all-`None` row; the model then fails loudly as infeasible rather than
/// silently dropping the diner.
#[derive(Debug, Clone)]
pub struct PreferenceMatrix {
    diners: usize,
    restaurants: usize,
    /// Row-major: `scores[d * restaurants + r]`.
    scores: Vec<Option<f64>>,
}

impl PreferenceMatrix {
    /// Normalizes raw ratings into per-diner z-scores.
    pub fn normalize(diners: &[Diner], restaurants: &[String]) -> Self {
        let mut scores = Vec::with_capacity(diners.len() * restaurants.len());

        for diner in diners {
            let valid: Vec<f64> = diner
                .preferences
                .values()
                .filter_map(|rating| rating.map(|r| r.score()))
                .collect();

            if valid.is_empty() {
                // Nothing ratable: excluded everywhere.
                scores.extend(std::iter::repeat(None).take(restaurants.len()));
                continue;
            }

            let mean = valid.iter().sum::<f64>() / valid.len() as f64;
            let mut stdev = if valid.len() > 1 {
                let var = valid.iter().map(|s| (s - mean).powi(2)).sum::<f64>()
                    / (valid.len() - 1) as f64;
                var.sqrt()
            } else {
                1.0
            };
            if stdev == 0.0 {
                stdev = 1.0;
            }

            for restaurant in restaurants {
                scores.push(diner.rating(restaurant).map(|r| (r.score() - mean) / stdev));
            }
        }

        Self {
            diners: diners.len(),
            restaurants: restaurants.len(),
            scores,
        }
    }

    /// Number of diner rows.
    #[inline]
    pub fn diner_count(&self) -> usize {
        self.diners
    }

    /// Number of restaurant columns.
    #[inline]
    pub fn restaurant_count(&self) -> usize {
        self.restaurants
    }

    /// Normalized score, `None` for a hard exclusion.
    #[inline]
    pub fn score(&self, diner: usize, restaurant: usize) -> Option<f64> {
        self.scores[diner * self.restaurants + restaurant]
    }

    /// Whether (diner, restaurant) is a hard exclusion.
    #[inline]
    pub fn is_excluded(&self, diner: usize, restaurant: usize) -> bool {
        self.score(diner, restaurant).is_none()
    }

    /// How many diners can eat at each restaurant.
    pub fn eligible_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.restaurants];
        for d in 0..self.diners {
            for (r, count) in counts.iter_mut().enumerate() {
                if !self.is_excluded(d, r) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Per-restaurant sum of normalized scores across diners, skipping
    /// exclusions. Used only to rank advisor candidates, never in the
    /// optimization objective.
    pub fn aggregate(&self) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.restaurants];
        for d in 0..self.diners {
            for (r, total) in totals.iter_mut().enumerate() {
                if let Some(score) = self.score(d, r) {
                    *total += score;
                }
            }
        }
        totals
    }

    /// Mean absolute normalized score over all non-excluded entries.
    ///
    /// Returns `None` when every entry is excluded.
    pub fn mean_abs_score(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for score in self.scores.iter().flatten() {
            sum += score.abs();
            count += 1;
        }
        (count > 0).then(|| sum / count as f64)
    }
}
