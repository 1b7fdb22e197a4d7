//! hashflate CLI
//!
//! Compress, decompress and benchmark files with the LZ77 + Huffman pipeline.

mod commands;
mod utils;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::{cmd_compress, cmd_decompress, cmd_test};
use hashflate::{Lz77Config, Method};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hashflate")]
#[command(author, version, about = "Parallel LZ77 + Huffman compressor")]
#[command(long_about = "
hashflate compresses files with a parallel hash-chain LZ77 stage followed by
Huffman coding. Each stage can also be run on its own.

Examples:
  hashflate compress book.txt
  hashflate compress book.txt -o book.hfl --blocks 8 --window 32768
  hashflate decompress book.txt.hfl
  hashflate test book.txt
  hashflate test book.txt -m deflate -m huffman --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log level (trace, debug, info, warn, error); overrides -v
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.hfl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression method
        #[arg(short, long, value_enum, default_value = "deflate")]
        method: MethodArg,

        #[command(flatten)]
        lz77: Lz77Args,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: input without .hfl, or <input>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Method the file was compressed with
        #[arg(short, long, value_enum, default_value = "deflate")]
        method: MethodArg,
    },

    /// Round-trip a file in memory and report sizes and timings
    #[command(alias = "t")]
    Test {
        /// File to test
        input: PathBuf,

        /// Methods to run (all if omitted)
        #[arg(short, long, value_enum)]
        method: Vec<MethodArg>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        #[command(flatten)]
        lz77: Lz77Args,
    },
}

/// Compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// LZ77 followed by Huffman coding
    Deflate,
    /// Huffman coding only
    Huffman,
    /// LZ77 only
    Lz77,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Deflate => Method::Deflate,
            MethodArg::Huffman => Method::Huffman,
            MethodArg::Lz77 => Method::Lz77,
        }
    }
}

/// LZ77 stage settings.
#[derive(Args)]
struct Lz77Args {
    /// Preset to start from
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,

    /// Sliding window size in bytes (1-65535)
    #[arg(long)]
    window: Option<usize>,

    /// Longest match in bytes (1-255)
    #[arg(long)]
    lookahead: Option<usize>,

    /// Number of independently compressed blocks
    #[arg(long)]
    blocks: Option<usize>,

    /// Candidates examined per position
    #[arg(long)]
    max_chain: Option<usize>,
}

/// LZ77 preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum Preset {
    /// Small window, shallow chains
    Fast,
    /// Balanced (default)
    #[default]
    Default,
    /// Largest window, every candidate
    Best,
}

impl Lz77Args {
    fn to_config(&self) -> Lz77Config {
        let mut config = match self.preset {
            Preset::Fast => Lz77Config::FAST,
            Preset::Default => Lz77Config::DEFAULT,
            Preset::Best => Lz77Config::BEST,
        };
        if let Some(window) = self.window {
            config.search_buffer_size = window;
        }
        if let Some(lookahead) = self.lookahead {
            config.lookahead_buffer_size = lookahead;
        }
        if let Some(blocks) = self.blocks {
            config = config.with_blocks(blocks);
        }
        if let Some(max_chain) = self.max_chain {
            config = config.with_max_chain(max_chain);
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.log_level.as_deref());
    let verbose = cli.verbose > 0;

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            method,
            lz77,
        } => cmd_compress(
            &input,
            output.as_deref(),
            method.into(),
            lz77.to_config(),
            verbose,
        ),
        Commands::Decompress {
            input,
            output,
            method,
        } => cmd_decompress(&input, output.as_deref(), method.into(), verbose),
        Commands::Test {
            input,
            method,
            json,
            lz77,
        } => {
            let methods: Vec<Method> = method.into_iter().map(Method::from).collect();
            cmd_test(&input, &methods, lz77.to_config(), json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
