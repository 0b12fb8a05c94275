use bridge_cli::replay::{LineOutcome, ReplayConfig, Replayer};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a captured table feed through the deal tracker", long_about = None)]
struct Args {
    /// JSON-lines capture to replay, `-` for stdin
    input: PathBuf,

    /// YAML file with `tracker` and `advisor` sections
    #[arg(short, long, env = "BRIDGE_REPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter such as `debug` or `bridge_tracker=debug`; falls back to RUST_LOG
    #[arg(long, env = "BRIDGE_LOG")]
    log_level: Option<String>,

    /// Suggest a card after every call and play
    #[arg(short, long)]
    advise: bool,

    /// Print the status of the last deal when the capture ends
    #[arg(short, long)]
    summary: bool,
}

fn init_logging(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = match &args.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };
    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let mut replayer = Replayer::new(&config, args.advise);
    for line in reader.lines() {
        match replayer.feed_line(&line?) {
            LineOutcome::Applied { terminal, advice } => {
                if let Some(snapshot) = terminal {
                    println!("{}", serde_json::to_string(&snapshot)?);
                }
                match advice {
                    Some(Ok(rec)) => eprintln!("advice: {}", rec),
                    Some(Err(reason)) => eprintln!("no advice: {}", reason),
                    None => {}
                }
            }
            LineOutcome::Rejected(e) => eprintln!("line {}: {}", replayer.stats().lines, e),
            LineOutcome::Analysis { .. } | LineOutcome::Ignored(_) | LineOutcome::Blank => {}
        }
    }

    if args.summary {
        if let Some(deal) = replayer.deal() {
            eprintln!("{}", deal.summary());
        }
    }
    if let Some(snapshot) = replayer.finish() {
        println!("{}", serde_json::to_string(&snapshot)?);
    }
    eprintln!("{}", serde_json::to_string(&replayer.stats())?);
    Ok(())
}
