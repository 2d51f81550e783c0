//! Input validation for dining plans.
//!
//! Checks structural integrity of diners, reservations, and day lists
//! before optimization. Detects:
//! - Duplicate diner identities
//! - Reservations referencing unknown restaurants or days
//! - Confirmed reservations too small to ever seat a group
//! - Diners who exclude every restaurant
//!
//! None of these abort a run: the optimizer handles them by design (a
//! degenerate diner or an undersized slot surfaces as an infeasible
//! model with an empty result). Validation exists so the operator sees
//! *why* before the solver says "no".

use std::collections::HashSet;

use crate::models::{Diner, Reservation, ReservationStatus};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two diners share the same email.
    DuplicateDiner,
    /// A reservation names a restaurant nobody rated.
    UnknownRestaurant,
    /// A reservation names a day outside the planned days.
    UnknownDay,
    /// A confirmed reservation's capacity is below the minimum group
    /// size, making its slot unsatisfiable on its own.
    UndersizedReservation,
    /// A diner excludes every restaurant and can never be seated.
    DegenerateDiner,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of one optimization run.
///
/// Checks:
/// 1. No duplicate diner emails
/// 2. Every diner can eat at at least one restaurant
/// 3. Reservations reference known restaurants and planned days
/// 4. Confirmed reservations can hold at least a minimum-size group
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(findings)` with every detected issue.
pub fn validate_input(
    diners: &[Diner],
    restaurants: &[String],
    days: &[String],
    reservations: &[Reservation],
    min_group_size: u32,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_emails = HashSet::new();
    for diner in diners {
        if !seen_emails.insert(diner.email.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDiner,
                format!("Duplicate diner: {}", diner.email),
            ));
        }

        if !restaurants.iter().any(|r| diner.can_eat(r)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DegenerateDiner,
                format!(
                    "Diner '{}' excludes every restaurant and cannot be seated",
                    diner.email
                ),
            ));
        }
    }

    let restaurant_set: HashSet<&str> = restaurants.iter().map(String::as_str).collect();
    let day_set: HashSet<&str> = days.iter().map(String::as_str).collect();

    for res in reservations {
        if !restaurant_set.contains(res.restaurant.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRestaurant,
                format!(
                    "Reservation references unknown restaurant '{}'",
                    res.restaurant
                ),
            ));
        }
        if !day_set.contains(res.day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!(
                    "Reservation for '{}' references unplanned day '{}'",
                    res.restaurant, res.day
                ),
            ));
        }
        if res.status == ReservationStatus::Confirmed && res.capacity < min_group_size {
            errors.push(ValidationError::new(
                ValidationErrorKind::UndersizedReservation,
                format!(
                    "Confirmed reservation at '{}' on {} holds {} but the minimum group is {}",
                    res.restaurant, res.day, res.capacity, min_group_size
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
