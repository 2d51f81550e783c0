//! Report and export formatting.
//!
//! Renders one optimization run for humans (grouped assignment listing,
//! metrics, preference summary, next-step suggestion) and for machines
//! (CSV export). Pure string building over the result; nothing here
//! touches the filesystem.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Diner, PlanResult, Rating};

/// Rating categories in summary order, least to most preferred.
/// `None` is the "Can't eat here" bucket.
const CATEGORIES: [(Option<Rating>, &str); 5] = [
    (None, "Can't"),
    (Some(Rating::DontWant), "Don't want"),
    (Some(Rating::Neutral), "Neutral"),
    (Some(Rating::Want), "Want"),
    (Some(Rating::MustHave), "Have to"),
];

fn title_case(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats the full human-readable report.
///
/// Assignments are grouped by day (in planned-day order) then
/// restaurant (sorted), with each diner shown by email local part and
/// their raw rating label. An empty result gets a two-line explanation
/// instead. The suggestion block, when present, closes the report.
pub fn format_report(result: &PlanResult, days: &[String], diners: &[Diner]) -> String {
    let mut lines: Vec<String> = Vec::new();

    let diner_by_email: HashMap<&str, &Diner> =
        diners.iter().map(|d| (d.email.as_str(), d)).collect();

    if result.assignments.is_empty() {
        lines.push("No assignments could be made.".to_string());
        lines.push("This may be because there are no confirmed reservations yet.".to_string());
    } else {
        lines.push("=== Restaurant Assignments ===".to_string());
        lines.push(format!(
            "Total satisfaction score: {:.2}",
            result.total_satisfaction
        ));
        lines.push(format!("Repeated pairings: {}", result.repeated_pairings));
        lines.push(String::new());

        // day → restaurant → (name, email); BTreeMap sorts restaurants.
        let mut by_day: HashMap<&str, BTreeMap<&str, Vec<(&str, &str)>>> = HashMap::new();
        for a in &result.assignments {
            let name = a.diner.split('@').next().unwrap_or(&a.diner);
            by_day
                .entry(a.day.as_str())
                .or_default()
                .entry(a.restaurant.as_str())
                .or_default()
                .push((name, a.diner.as_str()));
        }

        for day in days {
            let Some(by_restaurant) = by_day.get(day.as_str()) else {
                continue;
            };
            lines.push(format!("--- {} ---", title_case(day)));
            for (&restaurant, seated) in by_restaurant {
                lines.push(format!("  {} ({} diners):", restaurant, seated.len()));
                let mut seated = seated.clone();
                seated.sort_unstable();
                for (name, email) in seated {
                    let suffix = diner_by_email
                        .get(email)
                        .map(|diner| {
                            let label = diner
                                .rating(restaurant)
                                .map(Rating::label)
                                .unwrap_or("Can't");
                            format!(" ({label})")
                        })
                        .unwrap_or_default();
                    lines.push(format!("    - {name}{suffix}"));
                }
            }
            lines.push(String::new());
        }

        if !diners.is_empty() {
            lines.push(format_preference_summary(result, diners));
            lines.push(String::new());
        }
    }

    if let Some(suggestion) = &result.suggestion {
        lines.push("=== Next Reservation Suggestion ===".to_string());
        lines.push(format!("Restaurant: {}", suggestion.restaurant));
        lines.push(format!("Day: {}", title_case(&suggestion.day)));
        lines.push(format!("Suggested party size: {}", suggestion.capacity));
    } else if !result.assignments.is_empty() {
        lines.push("=== All reservations complete ===".to_string());
        lines.push("No additional reservations needed.".to_string());
    }

    lines.join("\n")
}

/// Formats the per-diner preference distribution table.
///
/// One row per diner, one column per rating category, each cell
/// `assigned/total`: of the restaurants the diner rated in that
/// category, how many they were actually sent to.
pub fn format_preference_summary(result: &PlanResult, diners: &[Diner]) -> String {
    let mut assigned_by_diner: HashMap<&str, HashSet<&str>> = HashMap::new();
    for a in &result.assignments {
        assigned_by_diner
            .entry(a.diner.as_str())
            .or_default()
            .insert(a.restaurant.as_str());
    }

    let mut sorted: Vec<&Diner> = diners.iter().collect();
    sorted.sort_by_key(|d| d.display_name());

    let rows: Vec<(&str, Vec<(usize, usize)>)> = sorted
        .iter()
        .map(|diner| {
            let assigned = assigned_by_diner.get(diner.email.as_str());
            let stats = CATEGORIES
                .iter()
                .map(|(rating, _)| {
                    let rated: Vec<&str> = diner
                        .preferences
                        .iter()
                        .filter(|(_, pref)| **pref == *rating)
                        .map(|(restaurant, _)| restaurant.as_str())
                        .collect();
                    let hit = rated
                        .iter()
                        .filter(|r| assigned.is_some_and(|set| set.contains(**r)))
                        .count();
                    (hit, rated.len())
                })
                .collect();
            (diner.display_name(), stats)
        })
        .collect();

    // Column widths: diner names, then each category's widest cell.
    let mut widths = vec![rows
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(5)
        .max("Diner".len())];
    for (i, (_, label)) in CATEGORIES.iter().enumerate() {
        let cell = rows
            .iter()
            .map(|(_, stats)| format!("{}/{}", stats[i].0, stats[i].1).len())
            .max()
            .unwrap_or(3);
        widths.push(label.len().max(cell));
    }

    let header: Vec<String> = std::iter::once("Diner")
        .chain(CATEGORIES.iter().map(|(_, label)| *label))
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    let header_line = header.join(" | ");

    let mut lines = vec![
        "=== Preference Summary ===".to_string(),
        header_line.clone(),
        "-".repeat(header_line.len()),
    ];
    for (name, stats) in &rows {
        let mut cells = vec![format!("{:<width$}", name, width = widths[0])];
        for (i, (hit, total)) in stats.iter().enumerate() {
            cells.push(format!(
                "{:<width$}",
                format!("{hit}/{total}"),
                width = widths[i + 1]
            ));
        }
        lines.push(cells.join(" | "));
    }

    lines.join("\n")
}

/// Formats assignments as CSV, one row per placement.
///
/// Sorted by planned-day order (days outside the plan sort last), then
/// restaurant, then diner; scores carry three decimals.
pub fn format_assignments_csv(result: &PlanResult, days: &[String]) -> String {
    let day_rank = |day: &str| {
        days.iter()
            .position(|d| d == day)
            .unwrap_or(days.len())
    };

    let mut sorted: Vec<_> = result.assignments.iter().collect();
    sorted.sort_by(|a, b| {
        day_rank(&a.day)
            .cmp(&day_rank(&b.day))
            .then_with(|| a.restaurant.cmp(&b.restaurant))
            .then_with(|| a.diner.cmp(&b.diner))
    });

    let mut lines = vec!["diner,day,restaurant,preference_score".to_string()];
    for a in sorted {
        lines.push(format!(
            "{},{},{},{:.3}",
            a.diner, a.day, a.restaurant, a.preference_score
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, ReservationSuggestion};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_diners() -> Vec<Diner> {
        vec![
            Diner::new("ada@x.com")
                .with_preference("Bistro", Some(Rating::Want))
                .with_preference("Cafe", Some(Rating::Neutral)),
            Diner::new("bob@x.com")
                .with_preference("Bistro", Some(Rating::MustHave))
                .with_preference("Cafe", None),
        ]
    }

    fn sample_result() -> PlanResult {
        PlanResult {
            assignments: vec![
                Assignment::new("bob@x.com", "Bistro", "tuesday", 0.71),
                Assignment::new("ada@x.com", "Bistro", "tuesday", 0.71),
                Assignment::new("ada@x.com", "Cafe", "wednesday", -0.71),
            ],
            total_satisfaction: 0.71,
            repeated_pairings: 0,
            suggestion: None,
        }
    }

    #[test]
    fn test_report_groups_by_day_then_restaurant() {
        let report = format_report(&sample_result(), &names(&["tuesday", "wednesday"]), &sample_diners());

        let tuesday = report.find("--- Tuesday ---").unwrap();
        let wednesday = report.find("--- Wednesday ---").unwrap();
        assert!(tuesday < wednesday);

        assert!(report.contains("Bistro (2 diners):"));
        // Diners listed by local part with their raw rating label.
        assert!(report.contains("- ada (Want)"));
        assert!(report.contains("- bob (Have to)"));
        assert!(report.contains("Total satisfaction score: 0.71"));
        assert!(report.contains("Repeated pairings: 0"));
        // No suggestion: the plan is complete.
        assert!(report.contains("=== All reservations complete ==="));
    }

    #[test]
    fn test_empty_result_explains_itself() {
        let result = PlanResult {
            suggestion: Some(ReservationSuggestion {
                restaurant: "Bistro".to_string(),
                day: "tuesday".to_string(),
                capacity: 4,
            }),
            ..PlanResult::new()
        };
        let report = format_report(&result, &names(&["tuesday"]), &sample_diners());

        assert!(report.contains("No assignments could be made."));
        assert!(!report.contains("=== Restaurant Assignments ==="));
        // The suggestion still renders so the user has a next step.
        assert!(report.contains("=== Next Reservation Suggestion ==="));
        assert!(report.contains("Restaurant: Bistro"));
        assert!(report.contains("Day: Tuesday"));
        assert!(report.contains("Suggested party size: 4"));
    }

    #[test]
    fn test_preference_summary_counts_assigned_over_total() {
        let summary = format_preference_summary(&sample_result(), &sample_diners());

        assert!(summary.contains("=== Preference Summary ==="));
        let ada = summary.lines().find(|l| l.starts_with("ada")).unwrap();
        let bob = summary.lines().find(|l| l.starts_with("bob")).unwrap();
        // ada: Can't 0/0, Don't want 0/0, Neutral 1/1 (Cafe), Want 1/1
        // (Bistro), Have to 0/0.
        assert_eq!(
            ada.split('|').map(str::trim).collect::<Vec<_>>(),
            vec!["ada", "0/0", "0/0", "1/1", "1/1", "0/0"]
        );
        // bob: excluded from Cafe (0/1 Can't), sent to Bistro (1/1 Have to).
        assert_eq!(
            bob.split('|').map(str::trim).collect::<Vec<_>>(),
            vec!["bob", "0/1", "0/0", "0/0", "0/0", "1/1"]
        );
    }

    #[test]
    fn test_csv_export_sorted_and_rounded() {
        let csv = format_assignments_csv(&sample_result(), &names(&["tuesday", "wednesday"]));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "diner,day,restaurant,preference_score",
                "ada@x.com,tuesday,Bistro,0.710",
                "bob@x.com,tuesday,Bistro,0.710",
                "ada@x.com,wednesday,Cafe,-0.710",
            ]
        );
    }

    #[test]
    fn test_csv_export_unknown_day_sorts_last() {
        let mut result = sample_result();
        result.assignments.push(Assignment::new("eve@x.com", "Cafe", "friday", 0.0));
        let csv = format_assignments_csv(&result, &names(&["tuesday", "wednesday"]));
        assert!(csv.ends_with("eve@x.com,friday,Cafe,0.000"));
    }
}
