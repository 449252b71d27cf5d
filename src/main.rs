//! Command-line front end for the climate dashboard.
//!
//! Each subcommand drives one dashboard flow: the live map feed, report
//! submission, and the weather station check.

use clap::{Parser, Subcommand};
use climate_service::analysis::feed::DEFAULT_FEED_LIMIT;
use climate_service::config::{self, AppConfig};
use climate_service::dashboard::{self, StationView, SubmissionForm};
use climate_service::ingest::open_meteo::OpenMeteoClient;
use climate_service::locations::{self, LOCATION_REGISTRY};
use climate_service::logging::{self, DataSource};
use climate_service::model::{Coordinates, IssueKind};
use climate_service::store::{CsvReportStore, ReportStore};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "climate_service")]
#[command(about = "T&T community climate-incident reports and live weather")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered towns, alphabetically.
    Locations,

    /// Show the map markers and the most recent reports.
    Feed {
        /// How many recent reports to list
        #[arg(long, default_value_t = DEFAULT_FEED_LIMIT)]
        limit: usize,
    },

    /// File a new incident report.
    Report {
        /// Registered town name, e.g. "San Fernando"
        #[arg(long)]
        location: String,
        /// One of: "Localized Flooding", "Excessive Heat", "Landslide",
        /// "Coastal Erosion", "Other"
        #[arg(long, value_parser = parse_issue)]
        issue: IssueKind,
        #[arg(long, default_value = "")]
        description: String,
        /// Latitude of a pinpointed map click
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of a pinpointed map click
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Check current conditions for a town.
    Weather {
        #[arg(long)]
        location: String,
    },
}

fn parse_issue(label: &str) -> Result<IssueKind, String> {
    IssueKind::from_label(label.trim()).ok_or_else(|| {
        let known: Vec<&str> = IssueKind::ALL.iter().map(|k| k.label()).collect();
        format!("unknown issue '{}'; expected one of: {}", label, known.join(", "))
    })
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = CsvReportStore::new(&config.store.reports_file);
    store.ensure_initialized()?;

    match cli.command {
        Commands::Locations => {
            for name in locations::list_names() {
                println!("{}", name);
            }
        }

        Commands::Feed { limit } => {
            let feed = dashboard::live_feed(&store, limit)?;
            if feed.is_empty() {
                println!("No reports yet. Be the first to add an update!");
                return Ok(());
            }

            println!("Community Incident Map ({} reports)", feed.total);
            for marker in &feed.markers {
                println!("  {} {} ({})", marker.color, marker.position, marker.issue);
            }
            println!();
            for (issue, count) in &feed.counts {
                println!("  {:<20} {}", issue.label(), count);
            }
            println!();
            println!("Recent Updates from the Ground");
            for report in &feed.recent {
                println!(
                    "  {} | {} | {} | {}",
                    report.timestamp, report.location_label, report.issue, report.description
                );
            }
        }

        Commands::Report {
            location,
            issue,
            description,
            lat,
            lon,
        } => {
            let clicked = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
            if let Some(c) = clicked {
                println!("GPS Captured: {}", c);
            }
            let form = SubmissionForm {
                location,
                issue,
                description,
                clicked,
            };
            let report = dashboard::submit_report(&store, &form)?;
            println!(
                "Report submitted: {} at {} ({}). View it with `feed`.",
                report.issue, report.location_label, report.timestamp
            );
        }

        Commands::Weather { location } => {
            let client = OpenMeteoClient::new(&config.weather.base_url, config.weather.timeout())?;
            match dashboard::weather_station(&client, &location)? {
                StationView::Available {
                    location,
                    reading,
                    alert,
                } => {
                    println!("{}", location);
                    println!("  Temperature:  {}°C", reading.temperature_celsius);
                    println!("  Wind Speed:   {} km/h", reading.windspeed_kmh);
                    println!("  Weather Code: {}", reading.weather_code);
                    if let Some(alert) = alert {
                        println!();
                        println!("{}", alert.message);
                    }
                }
                StationView::Unavailable { .. } => {
                    println!("Data currently unavailable. Please check your internet.");
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            logging::init_logger("info");
            logging::error(DataSource::System, None, &e.to_string());
            return ExitCode::FAILURE;
        }
    };
    logging::init_logger(&config.logging.level);
    logging::debug(
        DataSource::Registry,
        None,
        &format!("{} locations registered", LOCATION_REGISTRY.len()),
    );

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(DataSource::System, None, &e.to_string());
            ExitCode::FAILURE
        }
    }
}
