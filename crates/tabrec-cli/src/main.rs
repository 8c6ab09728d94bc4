//! tabrec CLI: streaming relational operators over key-sorted
//! tab-separated text.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tabrec_engine::{BindOptions, DiffOptions, MergeOptions, ReadOptions, SummaryFormat};
use tabrec_io::open_input;

#[derive(Parser)]
#[command(name = "tabrec")]
#[command(about = "Streaming merge/diff/rbind over sorted tab-separated text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join two key-sorted files on a formula (outer join on demand)
    Merge {
        /// Left input (`-` for stdin)
        left: PathBuf,
        /// Right input (`-` for stdin)
        right: PathBuf,
        /// Join formula: `tok(+tok)*`, tokens are 1-based column
        /// numbers, names, or `left=right` pairs
        formula: String,

        /// Treat the first line of each input as a header
        #[arg(short = 'H', long)]
        header: bool,

        /// Print the unified column names first
        #[arg(short = 'c', long)]
        col_names: bool,

        /// Keep unmatched rows: `l`/`x` left, `r`/`y` right, both when
        /// no side is given
        #[arg(short, long, value_name = "SIDE", num_args = 0..=1, default_missing_value = "both")]
        all: Option<String>,
    },

    /// List cell-level changes between two key-sorted files
    Changes {
        /// Old input (`-` for stdin)
        left: PathBuf,
        /// New input (`-` for stdin)
        right: PathBuf,
        /// Formula `join_group [~ context_group]`
        formula: String,

        /// Treat the first line of each input as a header
        #[arg(short = 'H', long)]
        header: bool,

        /// Print the unified column names first
        #[arg(short = 'c', long)]
        col_names: bool,

        /// Print a tally instead of rows; `brief` gives one
        /// tab-separated line of eight counts
        #[arg(short, long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "report")]
        summary: Option<String>,
    },

    /// Concatenate files by unified header
    Rbind {
        /// Inputs; the first line of each is its header
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the unified column names first
        #[arg(short = 'c', long)]
        col_names: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

struct CliError {
    message: String,
    code: u8,
}

impl From<tabrec_engine::EngineError> for CliError {
    fn from(e: tabrec_engine::EngineError) -> Self {
        CliError {
            message: e.to_string(),
            code: e.exit_code() as u8,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError {
            message: e.to_string(),
            code: 1,
        }
    }
}

fn dispatch(cmd: Commands) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cmd {
        Commands::Merge {
            left,
            right,
            formula,
            header,
            col_names,
            all,
        } => {
            let (keep_left, keep_right) = outer_flags(all.as_deref());
            let opts = MergeOptions {
                read: ReadOptions {
                    header,
                    ..Default::default()
                },
                col_names,
                keep_left,
                keep_right,
            };
            let fx = open_input(&left, opts.read.buffer_bytes)
                .map_err(|e| open_error(&left, &e))?;
            let fy = open_input(&right, opts.read.buffer_bytes)
                .map_err(|e| open_error(&right, &e))?;
            tabrec_engine::merge(fx, fy, &formula, &opts, &mut out)?;
        }
        Commands::Changes {
            left,
            right,
            formula,
            header,
            col_names,
            summary,
        } => {
            let opts = DiffOptions {
                read: ReadOptions {
                    header,
                    ..Default::default()
                },
                col_names,
                summary: summary.as_deref().map(summary_format),
            };
            let fx = open_input(&left, opts.read.buffer_bytes)
                .map_err(|e| open_error(&left, &e))?;
            let fy = open_input(&right, opts.read.buffer_bytes)
                .map_err(|e| open_error(&right, &e))?;
            tabrec_engine::changes(fx, fy, &formula, &opts, &mut out)?;
        }
        Commands::Rbind { files, col_names } => {
            let opts = BindOptions {
                col_names,
                ..Default::default()
            };
            let mut readers = Vec::with_capacity(files.len());
            for f in &files {
                readers.push(open_input(f, opts.buffer_bytes).map_err(|e| open_error(f, &e))?);
            }
            tabrec_engine::rbind(readers, &opts, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn open_error(path: &PathBuf, e: &io::Error) -> CliError {
    CliError {
        message: format!("cannot open `{}' for reading: {}", path.display(), e),
        code: 1,
    }
}

/// `--all` side selection: no value keeps both, otherwise the first
/// character picks the side (`l`/`x` left, `r`/`y` right).
fn outer_flags(all: Option<&str>) -> (bool, bool) {
    match all {
        None => (false, false),
        Some("both") => (true, true),
        Some(s) => {
            let first = s.as_bytes().first().copied();
            (
                matches!(first, Some(b'l') | Some(b'x')),
                matches!(first, Some(b'r') | Some(b'y')),
            )
        }
    }
}

fn summary_format(s: &str) -> SummaryFormat {
    if s == "brief" {
        SummaryFormat::Brief
    } else {
        SummaryFormat::Report
    }
}
