//! Errors raised while loading or validating generator configuration.

/// Raised while loading or validating configuration, always before generation starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("unable to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML/JSON for the expected shape.
    #[error("unable to parse config '{path}': {message}")]
    Parse { path: String, message: String },

    /// A required global default is absent.
    #[error("global defaults missing required field '{0}'")]
    MissingField(&'static str),

    /// A sampling range has `low > high`.
    #[error("invalid {name}: low {low} is greater than high {high}")]
    InvalidRange {
        name: &'static str,
        low: i64,
        high: i64,
    },

    /// A constraint bound is NaN or infinite.
    #[error("constraint '{field}' must be a finite number, got {value}")]
    NonFiniteConstraint { field: String, value: f64 },

    /// A hierarchy catalog has no labels to draw from.
    #[error("hierarchy catalog '{0}' is empty")]
    EmptyCatalog(&'static str),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
