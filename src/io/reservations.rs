//! Reservations YAML input and template output.
//!
//! The reservations file is a single document with a `reservations`
//! list. When the user has no file yet, `write_template` produces a
//! commented starter enumerating their restaurants, days, and the valid
//! status values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::models::Reservation;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ReservationsDoc {
    #[serde(default)]
    reservations: Vec<Reservation>,
}

/// Parses the reservations YAML.
///
/// An empty document or a missing `reservations` key yields an empty
/// list. Day names are lowercased so they compare against the planned
/// day list regardless of how the user typed them.
pub fn parse_reservations(path: &Path) -> Result<Vec<Reservation>, PlanError> {
    if !path.exists() {
        return Err(PlanError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: ReservationsDoc = serde_yaml::from_str(&text)?;
    let reservations: Vec<Reservation> = doc
        .reservations
        .into_iter()
        .map(|r| Reservation {
            day: r.day.to_lowercase(),
            ..r
        })
        .collect();

    debug!(count = reservations.len(), "parsed reservations");
    Ok(reservations)
}

/// Writes a starter reservations file.
///
/// The header comment lists the available restaurants, the planned
/// days, and the three status values; the body holds one confirmed
/// example entry for the first restaurant and day.
pub fn write_template(
    path: &Path,
    restaurants: &[String],
    days: &[String],
) -> Result<(), PlanError> {
    let example = Reservation::confirmed(
        restaurants.first().map(String::as_str).unwrap_or("Restaurant Name"),
        days.first().map(String::as_str).unwrap_or("tuesday"),
        8,
    );
    let body = serde_yaml::to_string(&ReservationsDoc {
        reservations: vec![example],
    })?;

    let header = format!(
        "# Reservations file for tableplan\n\
         # Add your confirmed reservations here.\n\
         #\n\
         # Available restaurants: {}\n\
         # Days: {}\n\
         #\n\
         # Status options:\n\
         #   - confirmed: reservation is locked in\n\
         #   - unavailable: tried to book but the restaurant couldn't accommodate\n\
         #   - pending: reservation request is outstanding\n\
         \n",
        restaurants.join(", "),
        days.join(", "),
    );

    fs::write(path, format!("{header}{body}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    fn write_yaml(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("reservations.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parses_entries_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            &dir,
            "reservations:\n\
             - restaurant: Bistro\n\
             \x20 day: Tuesday\n\
             \x20 capacity: 6\n\
             \x20 status: confirmed\n\
             - restaurant: Cafe\n\
             \x20 day: wednesday\n",
        );

        let reservations = parse_reservations(&path).unwrap();
        assert_eq!(reservations.len(), 2);

        assert_eq!(reservations[0].restaurant, "Bistro");
        // Day names are normalized to lowercase.
        assert_eq!(reservations[0].day, "tuesday");
        assert_eq!(reservations[0].capacity, 6);
        assert_eq!(reservations[0].status, ReservationStatus::Confirmed);

        // Omitted fields fall back to capacity 0, status pending.
        assert_eq!(reservations[1].capacity, 0);
        assert_eq!(reservations[1].status, ReservationStatus::Pending);
    }

    #[test]
    fn test_empty_document_yields_no_reservations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "\n");
        assert!(parse_reservations(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_reservations_key_yields_no_reservations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "notes: call the caterer\n");
        assert!(parse_reservations(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let err = parse_reservations(Path::new("/nonexistent/reservations.yaml")).unwrap_err();
        assert!(matches!(err, PlanError::InputNotFound { .. }));
    }

    #[test]
    fn test_malformed_document_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "reservations: {not: [a, list\n");
        let err = parse_reservations(&path).unwrap_err();
        assert!(matches!(err, PlanError::Yaml(_)));
    }

    #[test]
    fn test_template_round_trips_and_documents_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.yaml");

        write_template(&path, &names(&["Bistro", "Cafe"]), &names(&["tuesday", "wednesday"]))
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Available restaurants: Bistro, Cafe"));
        assert!(text.contains("Days: tuesday, wednesday"));
        assert!(text.contains("confirmed"));
        assert!(text.contains("unavailable"));
        assert!(text.contains("pending"));

        // The generated example parses back as a confirmed booking.
        let reservations = parse_reservations(&path).unwrap();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].restaurant, "Bistro");
        assert_eq!(reservations[0].day, "tuesday");
        assert_eq!(reservations[0].capacity, 8);
        assert_eq!(reservations[0].status, ReservationStatus::Confirmed);
    }
}
