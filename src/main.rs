mod cli;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use taskpad_lib::logging::init_logging;
use taskpad_lib::settings::{load_settings, IndexPolicy};
use taskpad_lib::store::format::SchemaVersion;
use taskpad_lib::store::TaskStore;

#[derive(Parser)]
#[command(
    name = "taskpad",
    version,
    about = "Console to-do list with file persistence",
    long_about = "A console to-do list. Tasks live in a JSON file in the app data \
directory; installations with the old pipe-delimited line file are migrated \
forward on first start."
)]
struct Cli {
    /// Backing file (default: the app data directory)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// On-disk format for --file (default: resolved from the extension)
    #[arg(long = "format", value_enum)]
    format: Option<FormatArg>,

    /// Report out-of-range task numbers as errors
    #[arg(long = "strict", conflicts_with = "lenient")]
    strict: bool,

    /// Silently ignore out-of-range task numbers
    #[arg(long = "lenient")]
    lenient: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Pipe-delimited lines, the earliest on-disk format
    Legacy,
    /// JSON array of records
    Json,
}

fn main() {
    let cli = Cli::parse();
    let _guards = init_logging();

    let settings = load_settings();
    let policy = if cli.strict {
        IndexPolicy::Strict
    } else if cli.lenient {
        IndexPolicy::Lenient
    } else {
        settings.index_policy
    };

    let mut store = match cli.file {
        Some(path) => {
            let format = match cli.format {
                Some(FormatArg::Legacy) => SchemaVersion::LegacyLines,
                Some(FormatArg::Json) => SchemaVersion::Structured,
                None => SchemaVersion::for_path(&path),
            };
            TaskStore::open(path, format, policy)
        }
        None => match TaskStore::open_default(policy) {
            Ok(store) => store,
            Err(err) => {
                eprintln!("Could not open the task store: {}", err);
                std::process::exit(1);
            }
        },
    };

    if let Err(err) = cli::run(&mut store) {
        eprintln!("Input error: {}", err);
        std::process::exit(1);
    }
}
