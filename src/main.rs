//! CLI entry point for the bikeshare explorer.
//!
//! Provides an interactive `explore` subcommand mirroring the classic
//! prompt-driven session, and a one-shot `report` subcommand for scripted
//! use. All statistics logic lives in the library; this binary only
//! collects validated filter input and prints what the core returns.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use bikeshare_explorer::{
    filters::{City, DayFilter, FilterSpec, MonthFilter},
    loader::load_trips,
    pager::RawDataPager,
    report::{render_json, render_report, render_rows},
    stats::TripStats,
    trips::TripTable,
};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "A tool to explore US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively explore a city's trip data with prompts
    Explore {
        /// Directory containing the city CSV files
        #[arg(short, long)]
        data_dir: Option<String>,
    },
    /// Print one report for the given filters and exit
    Report {
        /// City to analyze (chicago, new york, washington)
        #[arg(long)]
        city: String,

        /// Month name to filter by, or "all"
        #[arg(long, default_value = "all")]
        month: String,

        /// Day of week to filter by, or "all"
        #[arg(long, default_value = "all")]
        day: String,

        /// Directory containing the city CSV files
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Emit the report as pretty-printed JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explore { data_dir } => {
            explore_loop(&resolve_data_dir(data_dir))?;
        }
        Commands::Report {
            city,
            month,
            day,
            data_dir,
            json,
        } => {
            let spec = FilterSpec::from_args(&city, &month, &day)?;
            let table = load_trips(resolve_data_dir(data_dir), &spec)?;
            let stats = TripStats::from_table(&table);
            if json {
                println!("{}", render_json(&stats)?);
            } else {
                print!("{}", render_report(&stats));
            }
        }
    }

    Ok(())
}

/// Data directory precedence: CLI flag, then `BIKESHARE_DATA_DIR`, then cwd.
fn resolve_data_dir(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("BIKESHARE_DATA_DIR").ok())
        .unwrap_or_else(|| ".".to_string())
}

/// Runs prompt sessions until the user declines a restart.
fn explore_loop(data_dir: &str) -> Result<()> {
    println!("Hello! Let's explore some US bikeshare data!");

    loop {
        let spec = prompt_filters()?;
        info!(
            city = spec.city.label(),
            month = ?spec.month,
            day = ?spec.day,
            "Running query"
        );

        match load_trips(data_dir, &spec) {
            Ok(table) => {
                print!("{}", render_report(&TripStats::from_table(&table)));
                display_raw_rows(&table)?;
            }
            Err(e) => {
                error!(error = %e, "Query failed");
                println!("Could not load data: {e}");
            }
        }

        if !prompt_yes("\nWould you like to restart? Enter yes or no.")? {
            break;
        }
    }

    Ok(())
}

/// Collects a validated city/month/day triple, re-prompting on bad input.
fn prompt_filters() -> Result<FilterSpec> {
    let city: City = loop {
        let raw = read_line("Would you like to see data for Chicago, New York, or Washington?")?;
        match raw.parse() {
            Ok(city) => break city,
            Err(_) => println!("Not an appropriate city! Please choose again"),
        }
    };

    let filter_by = loop {
        let raw = read_line(
            "Would you like to filter the data by month, day, both or not at all? \
             Type \"none\" for no time filter",
        )?;
        if ["month", "day", "both", "none"].contains(&raw.as_str()) {
            break raw;
        }
        println!("Not an appropriate choice! Please choose again");
    };

    let mut month = MonthFilter::All;
    let mut day = DayFilter::All;

    if filter_by == "month" || filter_by == "both" {
        month = loop {
            let raw = read_line("Which month - January, February, March, ... , or December?")?;
            match raw.parse() {
                Ok(month) => break month,
                Err(_) => println!("Not an appropriate month! Please choose again"),
            }
        };
    }

    if filter_by == "day" || filter_by == "both" {
        day = loop {
            let raw = read_line(
                "Which day - Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or Sunday?",
            )?;
            match raw.parse() {
                Ok(day) => break day,
                Err(_) => println!("Not an appropriate day! Please choose again"),
            }
        };
    }

    println!("{}", "-".repeat(40));
    Ok(FilterSpec::new(city, month, day))
}

/// Pages through raw rows, five at a time, while the user keeps answering yes.
fn display_raw_rows(table: &TripTable) -> Result<()> {
    let mut pager = RawDataPager::new(table);

    if !prompt_yes("\nWould you like to view 5 rows of individual trip data? Enter yes or no")? {
        return Ok(());
    }

    loop {
        match pager.next_page() {
            Some(page) => print!("{}", render_rows(page)),
            None => {
                println!("No more data to view");
                break;
            }
        }
        if !prompt_yes("Do you wish to continue? Enter yes or no")? {
            break;
        }
    }

    Ok(())
}

fn prompt_yes(prompt: &str) -> Result<bool> {
    Ok(read_line(prompt)? == "yes")
}

/// Prints a prompt and returns one trimmed, lowercased line of input.
fn read_line(prompt: &str) -> Result<String> {
    println!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_lowercase())
}
