//! framemaker CLI
//!
//! Usage:
//!   framemaker [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --pixel-scale <SCALE>  Round committed frames to device pixels
//!   -v, --verbose              Log resolution steps to stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use framemaker::{LayoutConfig, LayoutDocument};

#[derive(Parser)]
#[command(name = "framemaker")]
#[command(about = "Resolve view frames from a TOML layout document")]
struct Cli {
    /// Layout document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Round committed frames to this many device pixels per point
    #[arg(short, long)]
    pixel_scale: Option<f64>,

    /// Log resolution steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("framemaker: pass a layout document or pipe one on stdin (see --help)");
        std::process::exit(2);
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let mut config = LayoutConfig::new();
    if let Some(scale) = cli.pixel_scale {
        config = config.with_pixel_scale(scale);
    }

    let resolved = LayoutDocument::parse(&source).and_then(|doc| doc.resolve(&config));
    match resolved {
        Ok(tree) => print!("{}", tree.outline()),
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "framemaker=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
