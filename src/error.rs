use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring the generator or writing fixtures.
///
/// Everything except the I/O and codec variants is a configuration error:
/// it is detected before a single order is generated.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("min_items ({min}) must not exceed max_items ({max})")]
    InvalidItemBounds { min: i64, max: i64 },

    #[error("min_items must be at least 1 (an order needs one item), got {0}")]
    MinItemsTooSmall(i64),

    #[error("invalid_rate must be within [0, 1], got {0}")]
    InvalidRate(f64),

    #[error("Lookup table '{0}' is empty")]
    EmptyDomain(&'static str),

    #[error("Invalid value in lookup table '{table}': '{value}' ({reason})")]
    InvalidDomainValue {
        table: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// True for errors caused by a bad argument or lookup table.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            GeneratorError::InvalidItemBounds { .. }
                | GeneratorError::MinItemsTooSmall(_)
                | GeneratorError::InvalidRate(_)
                | GeneratorError::EmptyDomain(_)
                | GeneratorError::InvalidDomainValue { .. }
                | GeneratorError::Yaml(_)
        )
    }
}
