use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod chart;
mod clean;
mod loader;
mod merge;
mod models;
mod pipeline;
mod rating;
mod report;
mod weekly;

use pipeline::PipelineConfig;

#[derive(Parser)]
#[command(name = "application-rating")]
#[command(about = "Scores loan applications and charts the weekly average rating", long_about = None)]
struct Cli {
    /// Applications CSV
    #[arg(long, global = true, default_value = "applications.csv")]
    applications: PathBuf,
    /// Industry reference CSV
    #[arg(long, global = true, default_value = "industries.csv")]
    industries: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the weekly average rating as a bar chart (default)
    Chart,
    /// Print the weekly average rating
    Weekly {
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = PipelineConfig {
        applications: cli.applications,
        industries: cli.industries,
    };
    let output = pipeline::run(&config)?;

    match cli.command.unwrap_or(Commands::Chart) {
        Commands::Chart => {
            chart::show(&output.weekly)?;
        }
        Commands::Weekly { json } => {
            if json {
                println!("{}", report::weekly_json(&output.weekly)?);
            } else if output.weekly.is_empty() {
                println!("No accepted applications.");
            } else {
                println!("Average rating per week:");
                for week in &output.weekly {
                    println!(
                        "- week {}: {:.2} across {} applications",
                        week.week, week.average_rating, week.application_count
                    );
                }
            }
        }
        Commands::Report { out } => {
            report::write_report(&out, &output)?;
            info!(path = %out.display(), "Report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
