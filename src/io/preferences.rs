//! Preferences CSV input.
//!
//! One row per diner, one column per restaurant holding a survey label.
//! The restaurant universe is the ordered set of non-metadata headers,
//! shared by every diner; rows without an email are skipped.

use std::path::Path;

use csv::Reader;
use tracing::debug;

use crate::error::PlanError;
use crate::models::{Diner, Rating};

/// Survey columns that are never restaurants.
const METADATA_COLUMNS: [&str; 4] = [
    "Timestamp",
    "Email Address",
    "Dining Out Days",
    "Do you have any dietary restrictions?",
];

const EMAIL_COLUMN: &str = "Email Address";

/// Maps a survey cell to a rating.
///
/// "Can't eat here" is the hard exclusion and maps to `None`; empty and
/// unrecognized cells count as neutral.
fn parse_label(cell: &str) -> Option<Rating> {
    match cell.trim() {
        "Have to eat here" => Some(Rating::MustHave),
        "Want to eat here" => Some(Rating::Want),
        "Neutral" => Some(Rating::Neutral),
        "Don't want to eat here" => Some(Rating::DontWant),
        "Can't eat here" => None,
        _ => Some(Rating::Neutral),
    }
}

/// Parses the preferences CSV into diners plus the restaurant universe.
///
/// Restaurant columns are every header that is not survey metadata,
/// blank, or an unnamed `Column N` placeholder, in header order.
pub fn parse_preferences(path: &Path) -> Result<(Vec<Diner>, Vec<String>), PlanError> {
    if !path.exists() {
        return Err(PlanError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let restaurant_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            !METADATA_COLUMNS.contains(h) && !h.trim().is_empty() && !h.starts_with("Column ")
        })
        .map(|(i, h)| (i, h.to_string()))
        .collect();
    let email_col = headers.iter().position(|h| h == EMAIL_COLUMN);

    let mut diners = Vec::new();
    for record in reader.records() {
        let record = record?;
        let email = email_col
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim();
        if email.is_empty() {
            continue;
        }

        let mut diner = Diner::new(email);
        for (col, restaurant) in &restaurant_cols {
            let cell = record.get(*col).unwrap_or("");
            diner = diner.with_preference(restaurant.clone(), parse_label(cell));
        }
        diners.push(diner);
    }

    let restaurants: Vec<String> = restaurant_cols.into_iter().map(|(_, name)| name).collect();
    debug!(
        diners = diners.len(),
        restaurants = restaurants.len(),
        "parsed preferences"
    );

    Ok((diners, restaurants))
}
