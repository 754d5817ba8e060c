//! Synthetic input generator
//!
//! Standalone dev tool that writes a deterministic stream of
//! blocks × dimension² floats in the converter's input format, so the
//! converter can be exercised without a real data dump.
//!
//! Usage:
//! ```bash
//! cargo run --bin gen_input -- 49 32 input.txt
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Synthetic Input Generator ===\n");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: gen_input <blocks> <dimension> [path]");
        std::process::exit(1);
    }

    let blocks: u32 = args[1]
        .parse()
        .map_err(|_| format!("Invalid block count '{}'", args[1]))?;
    let dimension: u32 = args[2]
        .parse()
        .map_err(|_| format!("Invalid dimension '{}'", args[2]))?;
    let path = args.get(3).map(String::as_str).unwrap_or("input.txt");

    println!(
        "Writing {} block(s) of {}×{} values to {}...",
        blocks, dimension, dimension, path
    );

    let mut out = BufWriter::new(File::create(path)?);
    for block in 0..blocks {
        for row in 0..dimension {
            for column in 0..dimension {
                write!(out, "{:.6} ", sample(block, row, column, dimension))?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;

    let total = u64::from(blocks) * u64::from(dimension) * u64::from(dimension);
    println!("✓ Wrote {} values", total);

    Ok(())
}

/// Radial bump drifting across the grid as the block index advances
fn sample(block: u32, row: u32, column: u32, dimension: u32) -> f64 {
    let d = f64::from(dimension);
    let cx = (f64::from(block) * 1.7).sin() * 0.3 * d + d / 2.0;
    let cy = (f64::from(block) * 2.3).cos() * 0.3 * d + d / 2.0;
    let dx = f64::from(column) - cx;
    let dy = f64::from(row) - cy;
    let sigma = (d / 6.0).max(1.0);
    (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
}
