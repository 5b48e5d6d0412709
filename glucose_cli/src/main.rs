use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use glucose_core::*;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gluco")]
#[command(about = "Glucose reading entry and insulin completion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dosing session for a time of day
    Classify {
        /// Time of day as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Validate a reading and print the record to transmit
    Submit {
        /// Sugar concentration in mg/dL, as typed
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Free-text note
        #[arg(long, default_value = "")]
        note: String,

        /// Patient username (defaults to patient.username from config)
        #[arg(long)]
        username: Option<String>,

        /// Capture time as "YYYY-MM-DD HH:MM:SS" (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Record an insulin dose on a pending record read from stdin
    Complete {
        /// Insulin intake in units, as typed
        #[arg(long, allow_hyphen_values = true)]
        intake: String,
    },

    /// Filter a record list read from stdin down to pending records
    Pending {
        /// Show completed records instead
        #[arg(long)]
        completed: bool,
    },

    /// Summarize one day of a record list read from stdin by session
    Day {
        /// Day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Use the day before --date (or before today)
        #[arg(long)]
        yesterday: bool,
    },

    /// List the dosing windows
    Windows,
}

fn main() {
    // Initialize logging
    glucose_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Classify { at } => cmd_classify(at),
        Commands::Submit {
            value,
            note,
            username,
            at,
        } => cmd_submit(value, note, username, at, &load_config(config_path)?),
        Commands::Complete { intake } => cmd_complete(intake, &load_config(config_path)?),
        Commands::Pending { completed } => cmd_pending(completed, &load_config(config_path)?),
        Commands::Day { date, yesterday } => cmd_day(date, yesterday),
        Commands::Windows => {
            cmd_windows();
            Ok(())
        }
    }
}

/// Only commands that print payloads or need a username read the config
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn cmd_classify(at: Option<String>) -> Result<()> {
    let time = match at {
        Some(ref s) => NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|e| Error::Other(format!("Invalid time {:?}: {}", s, e)))?,
        None => Local::now().time(),
    };

    println!("{}", classify_time(&time));
    Ok(())
}

fn cmd_submit(
    value: String,
    note: String,
    username: Option<String>,
    at: Option<String>,
    config: &Config,
) -> Result<()> {
    let captured_at = match at {
        Some(ref s) => parse_captured_at(s)?,
        None => Local::now().naive_local(),
    };
    let username = config.resolve_username(username)?;
    tracing::debug!("Submitting reading for {} captured at {}", username, captured_at);

    let input = ReadingInput {
        captured_at,
        sugar_concentration_raw: value,
        note,
        username,
    };

    let record = submit_reading(&input)?;
    print_json(&record, config)
}

fn cmd_complete(intake: String, config: &Config) -> Result<()> {
    let record: StoredRecord = serde_json::from_str(&read_stdin()?)?;
    let completed = complete_record(record, &intake)?;
    print_json(&completed, config)
}

fn cmd_pending(completed: bool, config: &Config) -> Result<()> {
    let records = parse_record_list(&read_stdin()?)?;
    let (pending, done) = partition_by_status(records);
    tracing::debug!("{} pending, {} completed", pending.len(), done.len());

    if completed {
        print_json(&done, config)
    } else {
        print_json(&pending, config)
    }
}

fn cmd_day(date: Option<String>, yesterday: bool) -> Result<()> {
    let mut day = match date {
        Some(ref s) => NaiveDate::parse_from_str(s, formatter::DATE_FORMAT)
            .map_err(|e| Error::Other(format!("Invalid date {:?}: {}", s, e)))?,
        None => Local::now().date_naive(),
    };
    if yesterday {
        day = previous_day(day)
            .ok_or_else(|| Error::Other("No day before the minimum date".into()))?;
    }

    let records = parse_record_list(&read_stdin()?)?;
    let summary = DailySummary::for_date(&records, day);

    println!("{}", day.format(formatter::DATE_FORMAT));
    for session in ClassifiedSession::NAMED {
        match summary.get(session) {
            Some(record) => {
                let unit = if record.unit.is_empty() {
                    GlucoseUnit::MgDl.label()
                } else {
                    record.unit.as_str()
                };
                let insulin = match record.insulin_intake {
                    Some(units) => format!("{} units", units),
                    None => "pending".to_string(),
                };
                println!(
                    "{:<17} {} {}  {}",
                    session.label(),
                    record.sugar_concentration,
                    unit,
                    insulin
                );
            }
            None => println!("{:<17} -", session.label()),
        }
    }

    let missing = summary.missing_sessions();
    if !missing.is_empty() {
        let labels: Vec<_> = missing.iter().map(|s| s.label()).collect();
        println!("Missing: {}", labels.join(", "));
    }

    Ok(())
}

fn cmd_windows() {
    for window in DOSING_WINDOWS {
        println!(
            "{:<17} {} - {}",
            window.session.label(),
            DosingWindow::format_minute(window.start_minute),
            DosingWindow::format_minute(window.end_minute)
        );
    }
}

fn parse_captured_at(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| Error::Other(format!("Invalid capture time {:?}: {}", s, e)))
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn print_json<T: Serialize + ?Sized>(value: &T, config: &Config) -> Result<()> {
    let json = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
