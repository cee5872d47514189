#![forbid(unsafe_code)]

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stepwise_rank::input::parse_items;
use stepwise_rank::{
    rank, ComparisonObserver, JsonlTraceSink, NaturalOrder, Oracle, PromptOracle,
    RankRunOptions, SessionOutcome, Strategy, TraceWorker,
};

#[derive(Parser)]
#[command(
    name = "stepwise-rank",
    version,
    about = "Rank items by answering pairwise questions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank items interactively, answering each question on stdin
    Ask {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Rank items by their natural (lexicographic) order and report the cost
    Simulate {
        #[command(flatten)]
        run: RunArgs,
    },
    /// List the available sort strategies
    Strategies,
}

#[derive(Args)]
struct RunArgs {
    /// File with one item per line
    #[arg(long, group = "items_source")]
    input: Option<PathBuf>,

    /// Comma-separated items (alternative to --input)
    #[arg(long, group = "items_source", value_delimiter = ',')]
    items: Option<Vec<String>>,

    /// Engine used to order the items (default: $STEPWISE_RANK_STRATEGY, else heap)
    #[arg(long, value_enum)]
    strategy: Option<CliStrategy>,

    /// Shuffle seed (default: $STEPWISE_RANK_SEED, else random)
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the input order instead of shuffling first
    #[arg(long)]
    no_shuffle: bool,

    /// Write one JSON line per answered question
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write the session outcome as JSON
    #[arg(long)]
    out: Option<PathBuf>,
}

/// CLI-facing strategy enum (clap::ValueEnum).
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliStrategy {
    Heap,
    Insertion,
    Merge,
}

impl From<CliStrategy> for Strategy {
    fn from(s: CliStrategy) -> Self {
        match s {
            CliStrategy::Heap => Strategy::Heap,
            CliStrategy::Insertion => Strategy::Insertion,
            CliStrategy::Merge => Strategy::Merge,
        }
    }
}

impl RunArgs {
    fn options(&self) -> RankRunOptions {
        let defaults = RankRunOptions::from_env();
        RankRunOptions {
            strategy: self.strategy.map_or(defaults.strategy, Strategy::from),
            rng_seed: self.seed.or(defaults.rng_seed),
            shuffle: !self.no_shuffle,
        }
    }

    /// Items from `--items`, `--input`, or (when `allow_stdin`) standard input.
    fn load_items(&self, allow_stdin: bool) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        if let Some(items) = &self.items {
            return Ok(items
                .iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect());
        }
        if let Some(path) = &self.input {
            return Ok(parse_items(&std::fs::read_to_string(path)?));
        }
        if !allow_stdin {
            return Err("ask reads answers from stdin; pass items with --input or --items".into());
        }
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        Ok(parse_items(&raw))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stepwise_rank=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask { run } => {
            let items = run.load_items(false)?;
            if items.is_empty() {
                eprintln!("nothing to rank");
                return Ok(());
            }
            let stdin = io::stdin();
            let mut oracle = PromptOracle::new(stdin.lock(), io::stdout());
            let outcome = run_ranking(&run, items, &mut oracle)?;

            let mut stdout = io::stdout().lock();
            writeln!(stdout)?;
            let noun = if outcome.comparisons == 1 { "question" } else { "questions" };
            writeln!(stdout, "Ranking ({} {noun}):", outcome.comparisons)?;
            for (idx, item) in outcome.sorted.iter().enumerate() {
                writeln!(stdout, "{}. {item}", idx + 1)?;
            }
        }
        Commands::Simulate { run } => {
            let items = run.load_items(true)?;
            let outcome = run_ranking(&run, items, &mut NaturalOrder)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Strategies => {
            for strategy in Strategy::ALL {
                println!("{strategy}");
            }
        }
    }

    Ok(())
}

fn run_ranking<O>(
    run: &RunArgs,
    items: Vec<String>,
    oracle: &mut O,
) -> Result<SessionOutcome<String>, Box<dyn std::error::Error>>
where
    O: Oracle<String>,
{
    let options = run.options();
    let tracer = match &run.trace {
        Some(path) => Some(JsonlTraceSink::new(path)?),
        None => None,
    };

    let observer = tracer
        .as_ref()
        .map(|(sink, _)| sink as &dyn ComparisonObserver<String>);
    let result = rank(items, &options, oracle, observer);

    if let Some((sink, worker)) = tracer {
        finish_trace(sink, worker)?;
    }
    let outcome = result?;

    if let Some(path) = &run.out {
        write_json(path, &outcome)?;
        eprintln!("[stepwise-rank] outcome written to {}", path.display());
    }
    Ok(outcome)
}

fn finish_trace(sink: JsonlTraceSink, worker: TraceWorker) -> Result<(), Box<dyn std::error::Error>> {
    drop(sink);
    worker.join()?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<(), io::Error> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
