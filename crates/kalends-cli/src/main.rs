//! kalends: resolve natural-language date phrases from the command line.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use kalends::{extract_date_with, Clock, Hemisphere, ResolveOptions, Resolution, SystemClock, ZonedClock};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Resolve a date phrase such as "the last day of next month" to a calendar date
#[derive(Parser, Debug)]
#[command(name = "kalends")]
#[command(version, about, long_about = None)]
struct Args {
    /// The phrase to resolve; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    phrase: Vec<String>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    reference: Option<NaiveDate>,

    /// Granularity for "after X" / "before X" (e.g. DAY, WEEK, MONTH_OF_YEAR)
    #[arg(long, env = "KALENDS_RESOLUTION", default_value = "DAY")]
    resolution: Resolution,

    /// Hemisphere for season names (north or south)
    #[arg(long, env = "KALENDS_HEMISPHERE", default_value = "north")]
    hemisphere: Hemisphere,

    /// IANA timezone that decides what "today" is (e.g. Europe/Berlin)
    #[arg(short, long, env = "KALENDS_TIMEZONE")]
    timezone: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Log resolution steps to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Output<'a> {
    phrase: &'a str,
    reference: NaiveDate,
    resolution: Resolution,
    hemisphere: Hemisphere,
    date: Option<NaiveDate>,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "kalends=debug",
        _ => "kalends=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn clock_for(timezone: Option<&str>) -> Result<Box<dyn Clock>> {
    match timezone {
        Some(name) => {
            let clock = ZonedClock::parse(name).with_context(|| format!("unknown timezone {name}"))?;
            Ok(Box::new(clock))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// Resolve and print; returns whether a date was found.
fn run(args: &Args) -> Result<bool> {
    let phrase = args.phrase.join(" ");
    let clock = clock_for(args.timezone.as_deref())?;
    let reference = args.reference.unwrap_or_else(|| clock.today());
    let options = ResolveOptions {
        resolution: args.resolution,
        hemisphere: args.hemisphere,
    };
    debug!(?options, %reference, "resolving from command line");

    let date = extract_date_with(&phrase, Some(reference), &options, clock.as_ref())
        .with_context(|| format!("failed to resolve '{phrase}'"))?;

    if args.json {
        let output = Output {
            phrase: &phrase,
            reference,
            resolution: options.resolution,
            hemisphere: options.hemisphere,
            date,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(date) = date {
        println!("{date}");
    }
    Ok(date.is_some())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("no date found");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
