//! Converter configuration
//!
//! Parameters arrive as flat name/value pairs: a JSON config file and CLI
//! flags both normalise into a `ParamReader`, and `ConverterConfig` is built
//! from the merged result. Malformed numeric values are hard errors naming
//! the offending field, never silently defaulted.

use std::path::PathBuf;

use crate::error::{ConverterError, Result};

/// Block side length used when `dimension` is not configured
pub const DEFAULT_DIMENSION: usize = 28;

/// Input file used when `input` is not configured
pub const DEFAULT_INPUT: &str = "input.txt";

/// One named parameter value
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// Reads converter parameters with type-safe conversions
///
/// Later pairs override earlier ones, so CLI flags are appended after the
/// config file entries. An empty value is treated as unset.
pub struct ParamReader {
    params: Vec<Param>,
}

impl ParamReader {
    /// Create from a list of name/value pairs
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let params = pairs
            .into_iter()
            .map(|(name, value)| Param { name, value })
            .collect();
        Self { params }
    }

    /// Create from a JSON config file body
    ///
    /// The file is a flat map of parameter names to values. String, number,
    /// and boolean values are accepted; anything else is skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ConverterError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut pairs = Vec::new();
        for (name, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            pairs.push((name, value_str));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Append a pair, overriding any earlier value for the same name
    pub fn append(&mut self, name: String, value: String) {
        self.params.push(Param { name, value });
    }

    /// Get raw parameter value (None if not set or empty)
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|p| p.name == name)
            .and_then(|p| {
                if p.value.is_empty() {
                    None
                } else {
                    Some(p.value.as_str())
                }
            })
    }

    /// Whether a non-empty value is set for this name
    pub fn is_set(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    /// Get string parameter with explicit default
    pub fn get_string(&self, name: &str, default: &str) -> String {
        self.get_raw(name).unwrap_or(default).to_string()
    }

    /// Get i64 parameter; unset is None, malformed is an error
    pub fn get_i64(&self, name: &str) -> Result<Option<i64>> {
        match self.get_raw(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ConverterError::InvalidInput {
                    field: name.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// Get usize parameter; unset is None, malformed or negative is an error
    pub fn get_usize(&self, name: &str) -> Result<Option<usize>> {
        match self.get_raw(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ConverterError::InvalidInput {
                    field: name.to_string(),
                    value: raw.to_string(),
                }),
        }
    }
}

/// Color-scale bounds for the settings line's cbrange clause
///
/// The bounds are passed through verbatim, lower first; no ordering check is
/// performed between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBounds {
    pub lower: i64,
    pub upper: i64,
}

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Number of blocks to extract (non-positive means nothing to do)
    pub iterations: i64,

    /// Side length of each square block
    pub dimension: usize,

    /// Source stream of whitespace-delimited floats
    pub input: PathBuf,

    /// Directory receiving the block files and the plot script
    pub output_dir: PathBuf,

    /// Optional fixed color range for the settings line
    pub color_bounds: Option<ColorBounds>,
}

impl ConverterConfig {
    /// Build a config from merged parameter pairs
    ///
    /// `iterations` must be present; the binary prompts for it first when
    /// running interactively. Color bounds are all-or-nothing: setting only
    /// one of `cb-low`/`cb-high` is a configuration error.
    pub fn from_params(params: &ParamReader) -> Result<Self> {
        let iterations = params
            .get_i64("iterations")?
            .ok_or_else(|| ConverterError::Config("'iterations' is not set".to_string()))?;

        let dimension = params.get_usize("dimension")?.unwrap_or(DEFAULT_DIMENSION);
        if dimension == 0 {
            return Err(ConverterError::Config(
                "'dimension' must be at least 1".to_string(),
            ));
        }

        let input = PathBuf::from(params.get_string("input", DEFAULT_INPUT));
        let output_dir = PathBuf::from(params.get_string("output-dir", "."));

        let color_bounds = match (params.get_i64("cb-low")?, params.get_i64("cb-high")?) {
            (Some(lower), Some(upper)) => Some(ColorBounds { lower, upper }),
            (None, None) => None,
            _ => {
                return Err(ConverterError::Config(
                    "'cb-low' and 'cb-high' must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            iterations,
            dimension,
            input,
            output_dir,
            color_bounds,
        })
    }

    /// Number of input values a full run consumes
    pub fn total_values(&self) -> u64 {
        if self.iterations <= 0 {
            0
        } else {
            self.iterations as u64 * (self.dimension * self.dimension) as u64
        }
    }
}
