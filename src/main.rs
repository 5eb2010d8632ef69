use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hotsort::datagen::DatasetGenerator;
use hotsort::input;
use hotsort::profile::{profile_batch_adjustment, profile_stream_handling};
use hotsort::{Config, IngestMode, IngestionController, DEFAULT_BATCH_SIZE, DEFAULT_THRESHOLD};

#[derive(Parser)]
#[command(name = "hotsort", version, about = "Incremental sorting with hot-value rebalancing")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort whitespace-separated integers from a file or stdin
    Sort {
        /// Input file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Values seen more than this many times in one batch are rebalanced
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: usize,

        /// `load` never rebalances; `batch` rebalances each chunk; `stream`
        /// handles one value at a time
        #[arg(short, long, value_enum, default_value_t = IngestMode::Load)]
        mode: IngestMode,

        /// Chunk size for `--mode batch`
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
    /// Print a summary of each generated dataset
    Datasets {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
    /// Time bulk load followed by batch and stream ingestion
    Profile {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn sort(input: Option<PathBuf>, config: Config) -> hotsort::Result<()> {
    config.validate()?;
    let values: Vec<i64> = match &input {
        Some(path) => input::read_values(path)?,
        None => input::read_values_from(io::stdin().lock())?,
    };
    info!(
        values = values.len(),
        threshold = config.threshold,
        mode = ?config.mode,
        "sorting input"
    );

    let mut sorter = IngestionController::from_config(&config)?;
    let outcome = sorter.ingest(values, config.mode, config.batch_size);
    if !outcome.is_noop() {
        info!(
            hot_values = outcome.hot_values,
            discarded = outcome.net_discarded(),
            "rebalanced hot values"
        );
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for value in sorter.output() {
        writeln!(out, "{}", value)?;
    }
    out.flush()?;
    Ok(())
}

fn datasets(seed: u64) {
    let mut generator = DatasetGenerator::from_seed(seed);
    for (name, data) in generator.catalog() {
        let head: Vec<_> = data.iter().take(10).collect();
        println!("{}: {:?}... (Length: {})", name, head, data.len());
    }
}

fn profile(seed: u64) {
    let batch = profile_batch_adjustment(seed);
    println!("batch adjustment ({} values)", batch.inner().len());
    print!("{}", batch.report());

    let stream = profile_stream_handling(seed);
    println!("\nstream handling ({} values)", stream.inner().len());
    print!("{}", stream.report());
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Sort {
            input,
            threshold,
            mode,
            batch_size,
        } => sort(
            input,
            Config {
                threshold,
                mode,
                batch_size,
            },
        ),
        Command::Datasets { seed } => {
            datasets(seed);
            Ok(())
        }
        Command::Profile { seed } => {
            profile(seed);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
