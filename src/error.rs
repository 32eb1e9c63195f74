//! Error types
//!
//! Geometry is total and never fails; only configuration and the browser
//! platform layer report errors.

use thiserror::Error;

/// Invalid chart configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("segment count must be at least 1")]
    NoSegments,

    #[error("view box must be a positive finite number, got {0}")]
    InvalidViewBox(f64),

    #[error("border size must be in (0, {max}], got {got}")]
    InvalidBorder { got: f64, max: f64 },

    #[error("theme field `{field}` must be a non-negative finite number, got {got}")]
    InvalidTheme { field: &'static str, got: f64 },

    #[error("malformed chart configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while mounting or wiring the chart in the browser
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("missing DOM element: {0}")]
    MissingElement(String),

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ConfigError::NoSegments.to_string(), "segment count must be at least 1");
        let err = ConfigError::InvalidBorder { got: 80.0, max: 75.0 };
        assert_eq!(err.to_string(), "border size must be in (0, 75], got 80");
        let err = PlatformError::from(ConfigError::InvalidViewBox(-1.0));
        assert_eq!(err.to_string(), "view box must be a positive finite number, got -1");
    }
}
