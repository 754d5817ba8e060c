//! Plot script emission
//!
//! The script drives gnuplot: one settings line fixing the axes and the png
//! terminal, then per block a `set output '{i}.png'` / `splot '{i}' matrix`
//! pair in ascending index order. Block references are relative names since
//! the script sits in the same directory as the block files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::ConverterConfig;
use crate::error::{ConverterError, Result};

/// File name of the emitted plot script
pub const SCRIPT_NAME: &str = "script.plt";

/// Result of writing the plot script
#[derive(Debug)]
pub struct ScriptFile {
    pub path: PathBuf,
    pub lines: u64,
}

/// Settings line fixing axis ranges, aspect ratio, and the png terminal
///
/// The cbrange clause is present iff color bounds were configured.
pub fn settings_line(config: &ConverterConfig) -> String {
    let max = config.dimension - 1;
    let mut line = format!("set xrange[0:{}]; set yrange[0:{}]; ", max, max);
    if let Some(bounds) = config.color_bounds {
        line.push_str(&format!(
            "set cbrange [{}:{}]; ",
            bounds.lower, bounds.upper
        ));
    }
    line.push_str("set size ratio 1; unset xtics; unset ytics; set pm3d map; set terminal pngcairo");
    line
}

/// Write the plot script for every block index in `0..iterations`
pub fn write_plot_script(config: &ConverterConfig) -> Result<ScriptFile> {
    let path = config.output_dir.join(SCRIPT_NAME);
    let write_failure = |source| ConverterError::OutputWrite {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_failure)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", settings_line(config)).map_err(write_failure)?;
    let mut lines = 1u64;

    for index in 0..config.iterations {
        writeln!(out, "set output '{}.png'", index).map_err(write_failure)?;
        writeln!(out, "splot '{}' matrix", index).map_err(write_failure)?;
        lines += 2;
    }

    out.flush().map_err(write_failure)?;
    Ok(ScriptFile { path, lines })
}
