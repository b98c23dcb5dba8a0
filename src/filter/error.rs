use thiserror::Error;

/// Errors that can occur when compiling a debug specification
#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error("Invalid pattern '{pattern}' in debug specification: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
