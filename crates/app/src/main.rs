use std::fmt;
use std::path::PathBuf;

use log::info;
use progress_core::model::Status;
use services::{report, ProgressService};
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- summary [--catalog <path>] [--statuses <path>]");
    eprintln!("  cargo run -p app -- export  [--catalog <path>] [--statuses <path>] [--out <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --catalog  data/courses.json");
    eprintln!("  --statuses data/autosave.json");
    eprintln!("  --settings data/settings.json");
    eprintln!("  --out      reports");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PROGRESS_CATALOG, PROGRESS_STATUSES, PROGRESS_SETTINGS");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Summary,
    Export,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "summary" => Some(Self::Summary),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

struct Args {
    catalog: PathBuf,
    statuses: PathBuf,
    settings: PathBuf,
    out: PathBuf,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env_path = |key: &str, fallback: &str| {
            std::env::var(key)
                .map_or_else(|_| PathBuf::from(fallback), PathBuf::from)
        };
        let mut parsed = Self {
            catalog: env_path("PROGRESS_CATALOG", "data/courses.json"),
            statuses: env_path("PROGRESS_STATUSES", "data/autosave.json"),
            settings: env_path("PROGRESS_SETTINGS", "data/settings.json"),
            out: PathBuf::from("reports"),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => parsed.catalog = require_value(args, "--catalog")?.into(),
                "--statuses" => parsed.statuses = require_value(args, "--statuses")?.into(),
                "--settings" => parsed.settings = require_value(args, "--settings")?.into(),
                "--out" => parsed.out = require_value(args, "--out")?.into(),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: printing the summary when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Summary,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Summary,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::json_files(&args.catalog, &args.statuses, &args.settings);
    let session = ProgressService::open(&storage);
    info!(
        "loaded {} courses, {} recorded statuses",
        session.catalog().courses.len(),
        session.store().len()
    );

    if session.catalog().is_empty() {
        eprintln!(
            "no courses loaded from {} (missing or empty export)",
            args.catalog.display()
        );
    }

    match cmd {
        Command::Summary => {
            for course in &session.catalog().courses {
                let progress = course.progress();
                let star = if session.settings().is_favorite(&course.id) {
                    "⭐ "
                } else {
                    ""
                };
                let breakdown = course.breakdown();
                println!(
                    "{star}{} - {}: {}/{} ({}%)",
                    course.id,
                    course.title,
                    progress.done,
                    progress.total,
                    progress.percent()
                );
                println!(
                    "  ✅ {}  ⏳ {}  ❌ {}",
                    breakdown.count(Status::Done),
                    breakdown.count(Status::InProgress),
                    breakdown.count(Status::NotDone)
                );
            }
            Ok(())
        }
        Command::Export => {
            let written = report::export_all(session.catalog(), &args.out)?;
            for path in &written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
