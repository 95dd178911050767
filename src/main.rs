//! Payroll calendar command line.
//!
//! # Commands
//!
//! - `payroll-calendar generate --start <date>` - Print or export a calendar
//! - `payroll-calendar serve` - Run the HTTP API

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_calendar::api::{AppState, create_router};
use payroll_calendar::calculation::generate_calendar;
use payroll_calendar::config::{
    CalendarSettings, DEFAULT_COUNTRY, DEFAULT_PAYDAY_OFFSET_DAYS, DEFAULT_PERIOD_COUNT,
    DEFAULT_SUBDIVISION, HolidayConfigLoader,
};
use payroll_calendar::error::EngineResult;
use payroll_calendar::export::{to_csv, to_ical, to_table};
use payroll_calendar::models::PayFrequency;

/// Payroll calendar generator
#[derive(Parser)]
#[command(name = "payroll-calendar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory of holiday YAML tables
    #[arg(long, global = true, default_value = "config/holidays")]
    holidays: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a payroll calendar
    Generate {
        /// First day of the first period (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Pay frequency (Weekly, Bi-weekly, Semi-monthly, Monthly)
        #[arg(short, long, default_value = "Bi-weekly")]
        frequency: String,

        /// Number of periods (6-52)
        #[arg(short, long, default_value_t = DEFAULT_PERIOD_COUNT)]
        periods: u32,

        /// Days from period end to payday (0-10)
        #[arg(long, default_value_t = DEFAULT_PAYDAY_OFFSET_DAYS)]
        offset: u32,

        /// Country code for holidays
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,

        /// State or province code; pass an empty value for country-wide holidays
        #[arg(long, default_value = DEFAULT_SUBDIVISION)]
        subdivision: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Ics,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Maps `generate` arguments onto calendar settings.
///
/// A blank subdivision selects country-wide holidays.
fn settings_from_args(
    start: &str,
    frequency: &str,
    periods: u32,
    offset: u32,
    country: String,
    subdivision: &str,
) -> EngineResult<CalendarSettings> {
    let frequency: PayFrequency = frequency.parse()?;
    let mut settings = CalendarSettings::new(CalendarSettings::parse_start_date(start)?, frequency);
    settings.period_count = periods;
    settings.payday_offset_days = offset;
    settings.country = country;
    settings.subdivision = match subdivision.trim() {
        "" => None,
        code => Some(code.to_string()),
    };
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = HolidayConfigLoader::load(&cli.holidays)
        .with_context(|| format!("loading holiday tables from {}", cli.holidays.display()))?;

    match cli.command {
        Commands::Generate {
            start,
            frequency,
            periods,
            offset,
            country,
            subdivision,
            format,
            output,
        } => {
            let settings =
                settings_from_args(&start, &frequency, periods, offset, country, &subdivision)?;
            let calendar = generate_calendar(&settings, &loader)?;
            for warning in &calendar.audit_trace.warnings {
                tracing::warn!(code = %warning.code, "{}", warning.message);
            }

            let rendered = match format {
                OutputFormat::Table => to_table(&calendar.rows),
                OutputFormat::Csv => to_csv(&calendar.rows)?,
                OutputFormat::Ics => to_ical(&calendar.rows, calendar.timestamp),
                OutputFormat::Json => serde_json::to_string_pretty(&calendar)?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(
                        path = %path.display(),
                        period_count = calendar.rows.len(),
                        adjusted_count = calendar.adjusted_count(),
                        "Calendar written"
                    );
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Serve { addr } => {
            let router = create_router(AppState::new(loader));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            info!(address = %addr, "Starting server");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
