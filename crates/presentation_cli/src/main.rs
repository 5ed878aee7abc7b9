//! Nobs Weather CLI
//!
//! Command-line interface for the AQI engine and live weather cards.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{HealthService, WeatherCardService};
use chrono::Utc;
use clap::{Parser, Subcommand};
use domain::air_quality::{BreakpointTable, Pollutant, PollutantReading, aggregate};
use domain::value_objects::Coordinates;
use infrastructure::{AppConfig, LoggingConfig, OpenMeteoAdapter, init_logging};
use tracing::debug;

/// Nobs Weather CLI
#[derive(Parser)]
#[command(name = "nobs-cli")]
#[command(author, version, about = "Nobs Weather AQI and forecast CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "NOBS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the AQI from raw concentrations in µg/m³
    ///
    /// Example: nobs-cli aqi --pm25 35.4 --o3 108
    Aqi {
        /// Carbon monoxide
        #[arg(long)]
        co: Option<f64>,

        /// Ozone
        #[arg(long)]
        o3: Option<f64>,

        /// Nitrogen dioxide
        #[arg(long)]
        no2: Option<f64>,

        /// Sulfur dioxide
        #[arg(long)]
        so2: Option<f64>,

        /// Fine particulate matter
        #[arg(long)]
        pm25: Option<f64>,

        /// Coarse particulate matter
        #[arg(long)]
        pm10: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the EPA breakpoint table
    Breakpoints {
        /// Only this pollutant (co, o3, no2, so2, pm25, pm10)
        pollutant: Option<String>,
    },

    /// Fetch the weather card for a location
    ///
    /// Example: nobs-cli card --lat 29.65 --lon -82.32 --name Gainesville
    Card {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Name shown on the card
        #[arg(long, default_value = "Current location")]
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch weather cards for every saved city in the config file
    Cities {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that the weather and air-quality providers respond
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Configured logging, with `-v` flags taking precedence over the file
fn logging_config(config: &AppConfig, verbose: u8) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if verbose > 0 {
        logging.level = log_filter_from_verbosity(verbose).to_string();
    }
    logging
}

/// Collect the pollutant flags into a reading
fn reading_from_flags(values: [Option<f64>; Pollutant::COUNT]) -> PollutantReading {
    Pollutant::ALL
        .into_iter()
        .zip(values)
        .filter_map(|(pollutant, value)| value.map(|v| (pollutant, v)))
        .collect()
}

fn card_service(config: &AppConfig) -> anyhow::Result<WeatherCardService> {
    let adapter = Arc::new(OpenMeteoAdapter::with_config(config.weather.clone())?);
    Ok(WeatherCardService::new(adapter.clone(), adapter))
}

fn health_service(config: &AppConfig) -> anyhow::Result<HealthService> {
    let adapter = Arc::new(OpenMeteoAdapter::with_config(config.weather.clone())?);
    Ok(HealthService::new(adapter.clone(), adapter)
        .with_timeout(Duration::from_secs(config.weather.timeout_secs)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_logging(&logging_config(&config, cli.verbose))?;
    debug!(cities = config.cities.len(), "Configuration loaded");

    match cli.command {
        Commands::Aqi {
            co,
            o3,
            no2,
            so2,
            pm25,
            pm10,
            json,
        } => {
            // Flag order follows Pollutant::ALL
            let reading = reading_from_flags([co, o3, no2, so2, pm25, pm10]);
            let report = aggregate(BreakpointTable::epa(), &reading)?;

            if json {
                let output = serde_json::json!({
                    "aqi": report.aqi(),
                    "category": report.aqi().category().label(),
                    "dominant_pollutant": report.dominant_pollutant(),
                    "sub_indices": report.sub_indices(),
                    "unclassifiable": report.unclassifiable(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render::report(&report));
            }
        },

        Commands::Breakpoints { pollutant } => {
            let only = pollutant
                .as_deref()
                .map(str::parse::<Pollutant>)
                .transpose()?;
            print!("{}", render::breakpoints(BreakpointTable::epa(), only));
        },

        Commands::Card {
            lat,
            lon,
            name,
            json,
        } => {
            let location = Coordinates::new(lat, lon)?;
            let card = card_service(&config)?
                .card_for_location(name, &location)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                print!("{}", render::card(&card, None));
            }
        },

        Commands::Cities { json } => {
            let cities = config.saved_cities()?;
            if cities.is_empty() {
                anyhow::bail!("No saved cities; add [[cities]] entries to the config file");
            }

            let results = card_service(&config)?.cards_for(&cities).await;
            let now = Utc::now();

            if json {
                let output: Vec<_> = cities
                    .iter()
                    .zip(&results)
                    .map(|(city, result)| match result {
                        Ok(card) => serde_json::json!({
                            "city": city,
                            "local_time": city.local_time(now).ok(),
                            "card": card,
                        }),
                        Err(e) => serde_json::json!({
                            "city": city,
                            "error": e.to_string(),
                        }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for (city, result) in cities.iter().zip(&results) {
                    match result {
                        Ok(card) => {
                            let time = city.local_time(now).ok();
                            print!("{}", render::card(card, time.as_deref()));
                        },
                        Err(e) => println!("{}\n  unavailable: {e}", city.display_name()),
                    }
                }
            }
        },

        Commands::Status { json } => {
            let report = health_service(&config)?.check_all().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::health(&report));
            }

            if !report.healthy {
                anyhow::bail!("One or more providers are unavailable");
            }
        },
    }

    Ok(())
}
