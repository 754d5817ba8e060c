//! Heatmap Block Converter - Main entry point
//!
//! Reads a flat stream of floats from one input file, re-chunks it into
//! square block files, and emits a gnuplot script that renders each block as
//! a heatmap image.
//!
//! Parameters come from a JSON config file (`--config`), CLI flags, or an
//! interactive prompt when the iteration count was not supplied:
//! ```bash
//! heatmap_converter --iterations 49 --dimension 32 --input input.txt
//! ```

use std::io::{self, BufRead};
use std::process;

use anyhow::{Context, Result};

use heatmap_converter::config::{ConverterConfig, ParamReader};
use heatmap_converter::error::ConverterError;
use heatmap_converter::pipeline;

fn main() {
    println!("Heatmap Block Converter v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(()) => {
            println!("\nConverter completed!");
        }
        Err(e) => {
            eprintln!("\n✗ Conversion failed: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let cli = parse_args(args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }

    let mut params = match &cli.config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path))?;
            let reader = ParamReader::from_json_str(&json)?;
            println!("Loaded configuration from {}", path);
            reader
        }
        None => ParamReader::from_pairs(Vec::new()),
    };

    for (name, value) in cli.pairs {
        params.append(name, value);
    }

    prompt_missing(&mut params)?;

    let config = ConverterConfig::from_params(&params)?;
    print_config_info(&config);

    let summary = pipeline::run(&config)?;
    println!(
        "✓ {} block file(s) + {} written",
        summary.blocks_written,
        summary.script_path.display()
    );

    Ok(())
}

/// Parsed command-line arguments
struct CliArgs {
    config_path: Option<String>,
    pairs: Vec<(String, String)>,
    help: bool,
}

/// Parse command-line arguments into parameter pairs
///
/// Value flags map directly onto parameter names, so `--iterations 49`
/// becomes the pair ("iterations", "49").
fn parse_args(args: &[String]) -> Result<CliArgs, ConverterError> {
    let mut cli = CliArgs {
        config_path: None,
        pairs: Vec::new(),
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                cli.help = true;
                i += 1;
            }
            "--config" if i + 1 < args.len() => {
                cli.config_path = Some(args[i + 1].clone());
                i += 2;
            }
            flag @ ("--input" | "--output-dir" | "--iterations" | "--dimension" | "--cb-low"
            | "--cb-high")
                if i + 1 < args.len() =>
            {
                cli.pairs
                    .push((flag.trim_start_matches("--").to_string(), args[i + 1].clone()));
                i += 2;
            }
            other => {
                return Err(ConverterError::Config(format!(
                    "Unknown or incomplete argument '{}' (try --help)",
                    other
                )));
            }
        }
    }

    Ok(cli)
}

/// Prompt for any parameter neither the config file nor the flags supplied
///
/// Only a missing iteration count triggers prompting; an interactive run
/// then also asks for both color bounds, in the dialog order the original
/// converter used. Empty answers leave the bounds unset.
fn prompt_missing(params: &mut ParamReader) -> Result<(), ConverterError> {
    if params.is_set("iterations") {
        return Ok(());
    }

    let stdin = io::stdin();
    let iterations = prompt(&stdin, "Number of iterations?")?;
    params.append("iterations".to_string(), iterations);

    let high = prompt(&stdin, "Values higher bound?")?;
    params.append("cb-high".to_string(), high);

    let low = prompt(&stdin, "Values lower bound?")?;
    params.append("cb-low".to_string(), low);

    Ok(())
}

fn prompt(stdin: &io::Stdin, question: &str) -> Result<String, ConverterError> {
    println!("{}", question);
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Print resolved configuration
fn print_config_info(config: &ConverterConfig) {
    println!("\nConfiguration:");
    println!("  Iterations: {}", config.iterations);
    println!("  Dimension: {}×{}", config.dimension, config.dimension);
    println!("  Input: {}", config.input.display());
    println!("  Output dir: {}", config.output_dir.display());
    match config.color_bounds {
        Some(bounds) => println!("  Color range: [{}:{}]", bounds.lower, bounds.upper),
        None => println!("  Color range: auto (no cbrange clause)"),
    }
}

fn print_usage() {
    println!("Usage: heatmap_converter [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <file>      JSON config file (flat map of the options below)");
    println!("  --input <file>       Input stream of floats (default: input.txt)");
    println!("  --output-dir <dir>   Directory for block files and script (default: .)");
    println!("  --iterations <n>     Number of blocks to extract (prompted if omitted)");
    println!("  --dimension <n>      Block side length (default: 28)");
    println!("  --cb-low <n>         Lower color-scale bound");
    println!("  --cb-high <n>        Upper color-scale bound");
}
