//! Next-reservation heuristic.
//!
//! Runs on every invocation, whether or not the solve succeeded: when the
//! model is infeasible (usually "not enough booked seats"), the suggestion
//! is the actionable next step. Pure ranking over already-derived data —
//! no solver involvement, deterministic by construction.

use std::collections::{HashMap, HashSet};

use crate::models::ReservationSuggestion;
use crate::prefs::PreferenceMatrix;

/// Proposes the single best (restaurant, day, capacity) to book next.
///
/// Days are ranked by how many diners still lack a booked seat (largest
/// deficit first, input order on ties). For each such day, candidate
/// restaurants are scanned in input order, skipping slots already
/// confirmed or marked unavailable and restaurants too few diners can
/// eat at. Candidates are scored by aggregate preference; only a strictly
/// better score displaces the incumbent, so ties keep the earliest
/// candidate and repeat calls return the same answer.
///
/// Returns `None` when every day already has enough booked capacity.
pub fn suggest_reservation(
    prefs: &PreferenceMatrix,
    restaurants: &[String],
    days: &[String],
    confirmed: &HashMap<(String, String), u32>,
    unavailable: &HashSet<(String, String)>,
    min_group_size: u32,
    max_group_size: u32,
) -> Option<ReservationSuggestion> {
    let diner_count = prefs.diner_count() as i64;
    let eligible = prefs.eligible_counts();
    let aggregates = prefs.aggregate();

    // Booked seats per day, from confirmed reservations only.
    let mut booked: HashMap<&str, i64> = days.iter().map(|d| (d.as_str(), 0i64)).collect();
    for ((_, day), &capacity) in confirmed {
        if let Some(total) = booked.get_mut(day.as_str()) {
            *total += i64::from(capacity);
        }
    }

    let mut deficits: Vec<(usize, i64)> = days
        .iter()
        .enumerate()
        .filter_map(|(t, day)| {
            let deficit = diner_count - booked[day.as_str()];
            (deficit > 0).then_some((t, deficit))
        })
        .collect();
    if deficits.is_empty() {
        return None;
    }
    // Stable sort: equal deficits keep day input order.
    deficits.sort_by(|a, b| b.1.cmp(&a.1));

    let mut best: Option<ReservationSuggestion> = None;
    let mut best_score = f64::NEG_INFINITY;

    for &(t, deficit) in &deficits {
        for (r, restaurant) in restaurants.iter().enumerate() {
            let key = (restaurant.clone(), days[t].clone());
            if confirmed.contains_key(&key) || unavailable.contains(&key) {
                continue;
            }
            if (eligible[r] as u32) < min_group_size {
                continue;
            }

            let score = aggregates[r];
            let capacity = max_group_size
                .min(deficit as u32)
                .min(eligible[r] as u32);
            if score > best_score && capacity >= min_group_size {
                best_score = score;
                best = Some(ReservationSuggestion {
                    restaurant: restaurant.clone(),
                    day: days[t].clone(),
                    capacity,
                });
            }
        }
    }

    best
}
