use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use symdex::index::{MatchMode, QueryOptions, SymbolIndex, stats};
use symdex::logging::{LogConfig, init_logging};
use symdex::output::{self, ColorMode};
use symdex::payload::read_payloads;
use symdex::utils::AppConfig;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "symdex")]
#[command(about = "Prefix search over documentation symbol indexes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Payload file (Doxygen searchData .js or .json); may be repeated
    #[arg(short, long = "data", global = true)]
    data: Vec<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List symbols whose label starts with a prefix (case-insensitive)
    Query {
        /// Label prefix; an empty prefix lists every symbol
        prefix: String,

        /// Match anywhere in the label instead of at the start
        #[arg(short, long)]
        substring: bool,

        /// Maximum number of symbols (0 = unlimited)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the destinations of an exact label
    Lookup {
        /// Exact label (case-sensitive)
        label: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogConfig::from_env().with_verbosity(cli.verbose)) {
        eprintln!("symdex: failed to initialize logging: {}", e);
    }

    // A broken config only matters when it is the source of the data files
    let config = if cli.data.is_empty() {
        AppConfig::load()?
    } else {
        AppConfig::load().unwrap_or_else(|e| {
            warn!("ignoring config: {:#}", e);
            AppConfig::default()
        })
    };
    let color = cli.color.choice(config.color, std::io::stdout().is_terminal());

    let index = load_index(&cli.data, &config)?;

    match cli.command {
        Commands::Query {
            prefix,
            substring,
            limit,
            json,
        } => {
            let mode = if substring {
                MatchMode::Substring
            } else {
                MatchMode::Prefix
            };
            let limit = match limit.unwrap_or(config.default_limit) {
                0 => None,
                n => Some(n),
            };

            let mut results = index.query_with(&prefix, QueryOptions { mode, limit: None });
            let total = results.len();
            if let Some(limit) = limit {
                results.truncate(limit);
            }
            info!(term = %prefix, matches = total, shown = results.len(), "query");

            if json {
                output::print_json(&results)?;
            } else {
                output::print_matches(&results, &prefix, mode, color)?;
            }

            if let Some(notice) = output::truncation_notice(results.len(), total) {
                eprintln!("{}", notice);
            }
        }
        Commands::Lookup { label, json } => {
            let destinations = index.exact_lookup(&label)?;
            if json {
                output::print_json(destinations)?;
            } else {
                output::print_lookup(&label, destinations, color)?;
            }
        }
        Commands::Stats => {
            stats::show_stats(&index);
        }
    }

    Ok(())
}

/// Load every payload file into one index (command line wins over config)
fn load_index(data: &[PathBuf], config: &AppConfig) -> Result<SymbolIndex> {
    let files = if data.is_empty() {
        config.data_files.as_slice()
    } else {
        data
    };

    if files.is_empty() {
        bail!("No data files given. Pass --data <FILE> or set data_files in the config file");
    }

    let entries = read_payloads(files)?;
    let mut index = SymbolIndex::new();
    index
        .load(entries)
        .context("Failed to build symbol index")?;

    info!(
        files = files.len(),
        labels = index.len(),
        destinations = index.destination_count(),
        "index loaded"
    );
    Ok(index)
}
