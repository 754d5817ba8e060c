//! Shared conversion pipeline
//!
//! The pipeline:
//! 1. Opens the input stream
//! 2. Converts one block file per iteration
//! 3. Emits the plot script referencing every block
//!
//! Script emission happens strictly after all blocks are written; it depends
//! only on block identity, never on block contents.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::ConverterConfig;
use crate::convert::{convert_block, ValueReader};
use crate::error::{ConverterError, Result};
use crate::script;

/// Summary of one conversion run
#[derive(Debug)]
pub struct RunSummary {
    pub blocks_written: u64,
    pub values_read: u64,
    pub script_path: PathBuf,
    pub script_lines: u64,
}

/// Run the full conversion: block files first, then the plot script
pub fn run(config: &ConverterConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let blocks = config.iterations.max(0);

    println!("\n[1/3] Opening input stream...");
    println!("  Input: {}", config.input.display());
    println!("  Values required: {}", config.total_values());

    let file = File::open(&config.input).map_err(|source| ConverterError::InputOpen {
        path: config.input.clone(),
        source,
    })?;
    let mut reader = ValueReader::new(BufReader::new(file));

    fs::create_dir_all(&config.output_dir).map_err(|source| ConverterError::OutputWrite {
        path: config.output_dir.clone(),
        source,
    })?;

    println!(
        "\n[2/3] Converting {} block(s) of {}×{} values...",
        blocks, config.dimension, config.dimension
    );

    let mut blocks_written = 0u64;
    for index in 0..config.iterations {
        let block = convert_block(&mut reader, index, config.dimension, &config.output_dir)?;
        println!(
            "  Block {}/{}: {} ({} values)",
            index + 1,
            blocks,
            block.path.display(),
            block.values
        );
        blocks_written += 1;
    }

    println!("\n[3/3] Writing plot script...");
    let script = script::write_plot_script(config)?;
    println!(
        "  Script: {} ({} lines)",
        script.path.display(),
        script.lines
    );

    println!(
        "\n✓ Conversion complete ({} values in {:.3}s)",
        reader.consumed(),
        start.elapsed().as_secs_f64()
    );

    Ok(RunSummary {
        blocks_written,
        values_read: reader.consumed(),
        script_path: script.path,
        script_lines: script.lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorBounds;
    use std::path::Path;

    fn workspace(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "heatmap_converter_pipeline_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_input(dir: &Path, values: &[f64]) -> PathBuf {
        let body: String = values
            .iter()
            .map(|v| format!("{:.6} ", v))
            .collect();
        let path = dir.join("input.txt");
        fs::write(&path, body).unwrap();
        path
    }

    fn config(dir: &Path, iterations: i64, dimension: usize) -> ConverterConfig {
        ConverterConfig {
            iterations,
            dimension,
            input: dir.join("input.txt"),
            output_dir: dir.join("out"),
            color_bounds: None,
        }
    }

    #[test]
    fn test_run_worked_example() {
        let dir = workspace("worked_example");
        write_input(&dir, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let cfg = config(&dir, 2, 2);

        let summary = run(&cfg).unwrap();
        assert_eq!(summary.blocks_written, 2);
        assert_eq!(summary.values_read, 8);
        assert_eq!(summary.script_lines, 5);

        assert_eq!(
            fs::read_to_string(cfg.output_dir.join("0")).unwrap(),
            "1.000000 2.000000 \n3.000000 4.000000 \n"
        );
        assert_eq!(
            fs::read_to_string(cfg.output_dir.join("1")).unwrap(),
            "5.000000 6.000000 \n7.000000 8.000000 \n"
        );

        let body = fs::read_to_string(&summary.script_path).unwrap();
        assert!(body.contains("set output '0.png'\nsplot '0' matrix\n"));
        assert!(body.contains("set output '1.png'\nsplot '1' matrix\n"));
    }

    #[test]
    fn test_run_conserves_value_sequence() {
        let dir = workspace("conservation");
        let values: Vec<f64> = (0..3 * 4 * 4).map(|i| i as f64 * 0.25).collect();
        write_input(&dir, &values);
        let cfg = config(&dir, 3, 4);

        let summary = run(&cfg).unwrap();
        assert_eq!(summary.blocks_written, 3);

        // concatenating the block files in index order restores the input
        let mut tokens = Vec::new();
        for index in 0..3 {
            let body = fs::read_to_string(cfg.output_dir.join(index.to_string())).unwrap();
            assert_eq!(body.lines().count(), 4);
            for line in body.lines() {
                let row: Vec<&str> = line.split_whitespace().collect();
                assert_eq!(row.len(), 4);
                tokens.extend(row.iter().map(|t| t.to_string()));
            }
        }
        let expected: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_run_zero_iterations() {
        let dir = workspace("zero_iterations");
        write_input(&dir, &[]);
        let cfg = config(&dir, 0, 28);

        let summary = run(&cfg).unwrap();
        assert_eq!(summary.blocks_written, 0);
        assert_eq!(summary.values_read, 0);
        assert_eq!(summary.script_lines, 1);

        let entries: Vec<_> = fs::read_dir(&cfg.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("script.plt")]);
    }

    #[test]
    fn test_run_short_stream_fails_without_partial_block() {
        let dir = workspace("short_stream");
        write_input(&dir, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let cfg = config(&dir, 2, 2);

        match run(&cfg) {
            Err(ConverterError::InputExhausted { block, row, column }) => {
                assert_eq!((block, row, column), (1, 0, 1));
            }
            other => panic!("expected InputExhausted, got {:?}", other),
        }

        assert!(cfg.output_dir.join("0").exists());
        assert!(!cfg.output_dir.join("1").exists());
        assert!(!cfg.output_dir.join("script.plt").exists());
    }

    #[test]
    fn test_run_missing_input() {
        let dir = workspace("missing_input");
        let cfg = config(&dir, 1, 2);

        assert!(matches!(
            run(&cfg),
            Err(ConverterError::InputOpen { .. })
        ));
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = workspace("idempotent");
        let values: Vec<f64> = (0..2 * 3 * 3).map(|i| (i as f64).sin()).collect();
        write_input(&dir, &values);
        let mut cfg = config(&dir, 2, 3);
        cfg.color_bounds = Some(ColorBounds { lower: 0, upper: 1 });

        run(&cfg).unwrap();
        let first: Vec<Vec<u8>> = ["0", "1", "script.plt"]
            .iter()
            .map(|name| fs::read(cfg.output_dir.join(name)).unwrap())
            .collect();

        run(&cfg).unwrap();
        let second: Vec<Vec<u8>> = ["0", "1", "script.plt"]
            .iter()
            .map(|name| fs::read(cfg.output_dir.join(name)).unwrap())
            .collect();

        assert_eq!(first, second);
    }
}
