//! seqview - Terminal DNA Sequence Viewer
//!
//! A terminal-based viewer for single DNA sequences.
//!
//! ## Usage
//!
//! ```bash
//! seqview genome.fa                   # view a FASTA file
//! seqview genome.fa -w 80             # wrap rows at 80 bases
//! seqview --random 5000 --seed 7      # view a random sequence
//! seqview genome.fa -t rc -o out.fa   # reverse-complement to a file
//! ```
//!
//! ## Navigation (Vim-style)
//!
//! - `h/j/k/l`: Move left/down/up/right
//! - `v` + `Enter`: Select and highlight a span
//! - `/`: Search, `n`/`N`: next/previous match
//! - `:q`: Quit
//! - `:h`: Help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use seqview::controller::run_app;
use seqview::fasta::{read_fasta_file, write_fasta};
use seqview::model::{AppState, Sequence, DEFAULT_ROW_WIDTH};
use seqview::transform::TransformOp;

/// Runs CLI mode: write the (possibly transformed) sequence as FASTA.
fn run_cli_mode(seq: &Sequence, output: &str) -> Result<()> {
    if output == "-" {
        // Write to stdout
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_fasta(&mut handle, seq)?;
    } else {
        // Write to file
        let mut file = std::fs::File::create(output)?;
        write_fasta(&mut file, seq)?;
        eprintln!("Wrote {} bp to {}", seq.len(), output);
    }

    Ok(())
}

/// Sequence transformation for command line use
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransformArg {
    /// Reverse-complement
    Rc,
    /// Reverse only
    R,
    /// Complement only
    C,
}

impl From<TransformArg> for TransformOp {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Rc => TransformOp::ReverseComplement,
            TransformArg::R => TransformOp::Reverse,
            TransformArg::C => TransformOp::Complement,
        }
    }
}

/// seqview - A Vim-style terminal viewer for DNA sequences
///
/// When run without -o/--output, opens an interactive TUI viewer.
/// With -o/--output, runs in CLI mode and writes FASTA to file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file to display (single-record FASTA or plain text)
    file: Option<PathBuf>,

    /// Bases per display row
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_ROW_WIDTH)]
    width: usize,

    /// Generate a random sequence instead of reading a file
    #[arg(long, value_name = "LENGTH", num_args = 0..=1, default_missing_value = "10000")]
    random: Option<usize>,

    /// Seed for --random, for reproducible sequences
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Apply a transformation before display or output
    #[arg(short = 't', long = "transform", value_enum)]
    transform: Option<TransformArg>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.width == 0 {
        anyhow::bail!("Row width must be at least 1");
    }

    let (mut sequence, source) = match (&args.file, args.random) {
        (Some(path), None) => {
            let seq = read_fasta_file(path, args.width)?;
            (seq, path.display().to_string())
        }
        (None, Some(length)) => {
            if length == 0 {
                anyhow::bail!("Random length must be at least 1");
            }
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let seq = Sequence::random("random", length, args.width, &mut rng);
            (seq, format!("random ({} bp)", length))
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Give either a sequence file or --random, not both")
        }
        (None, None) => anyhow::bail!("Give a sequence file or --random <length>"),
    };

    if let Some(arg) = args.transform {
        let op: TransformOp = arg.into();
        let transformed = op.apply(sequence.as_str());
        sequence = Sequence::from_parts(sequence.id.clone(), transformed, args.width);
    }

    // CLI mode: output to file/stdout
    if let Some(output) = args.output {
        run_cli_mode(&sequence, &output)?;
    } else {
        run_app(AppState::new(sequence, Some(source)))?;
    }

    Ok(())
}
