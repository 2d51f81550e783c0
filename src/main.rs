//! Command-line entry point for tableplan.
//!
//! ```bash
//! tableplan preferences.csv --days tuesday wednesday
//! tableplan preferences.csv --days tuesday wednesday --reservations reservations.yaml
//! tableplan preferences.csv --days mon tue wed --min-group-size 3 --max-group-size 6
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use tableplan::error::PlanError;
use tableplan::io::{preferences, report, reservations};
use tableplan::models::ReservationStatus;
use tableplan::solver::{optimize, PlanRequest};
use tableplan::validation::validate_input;

#[derive(Parser)]
#[command(name = "tableplan")]
#[command(version)]
#[command(about = "Optimize restaurant assignments for multi-day group dining")]
struct Cli {
    /// CSV file with diner preferences
    preferences_csv: PathBuf,

    /// Day names for the event (e.g. tuesday wednesday)
    #[arg(long, num_args = 1.., required = true)]
    days: Vec<String>,

    /// Reservations YAML file
    #[arg(long)]
    reservations: Option<PathBuf>,

    /// Minimum diners per restaurant
    #[arg(long, default_value_t = 4)]
    min_group_size: u32,

    /// Maximum diners per restaurant
    #[arg(long, default_value_t = 8)]
    max_group_size: u32,

    /// Path for the generated reservations template
    #[arg(long)]
    output_template: Option<PathBuf>,

    /// Assume every restaurant can be booked at max group size
    #[arg(long)]
    one_shot: bool,

    /// Diversity penalty weight (default: auto-computed, 0 disables)
    #[arg(long)]
    diversity_weight: Option<f64>,

    /// Also write the assignments as CSV to this path
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PlanError> {
    let days: Vec<String> = cli.days.iter().map(|d| d.to_lowercase()).collect();

    let (diners, restaurants) = preferences::parse_preferences(&cli.preferences_csv)?;
    println!(
        "Loaded {} diners and {} restaurants",
        diners.len(),
        restaurants.len()
    );

    let loaded = match &cli.reservations {
        Some(path) => {
            let loaded = reservations::parse_reservations(path)?;
            let confirmed = loaded
                .iter()
                .filter(|r| r.status == ReservationStatus::Confirmed)
                .count();
            println!("Loaded {confirmed} confirmed reservations");
            loaded
        }
        None => Vec::new(),
    };

    if loaded.is_empty() {
        let template_path = cli
            .output_template
            .clone()
            .unwrap_or_else(|| PathBuf::from("reservations_template.yaml"));
        reservations::write_template(&template_path, &restaurants, &days)?;
        println!(
            "\nNo reservations file provided. Created template at: {}",
            template_path.display()
        );
        println!("Edit this file to add your confirmed reservations, then run again.\n");
    }

    if let Err(findings) =
        validate_input(&diners, &restaurants, &days, &loaded, cli.min_group_size)
    {
        for finding in findings {
            warn!(kind = ?finding.kind, "{}", finding.message);
        }
    }

    let mut request = PlanRequest::new(diners, restaurants, days)
        .with_reservations(loaded)
        .with_group_sizes(cli.min_group_size, cli.max_group_size)
        .with_one_shot(cli.one_shot);
    if let Some(weight) = cli.diversity_weight {
        request = request.with_diversity_weight(weight);
    }

    let result = optimize(&request);

    println!();
    println!(
        "{}",
        report::format_report(&result, &request.days, &request.diners)
    );

    if let Some(path) = &cli.export_csv {
        fs::write(path, report::format_assignments_csv(&result, &request.days))?;
        println!("\nAssignments exported to: {}", path.display());
    }

    Ok(())
}
