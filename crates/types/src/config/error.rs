/// Error type for [`crate::config`] module. Captures errors related to loading
/// configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable {key}: {source}")]
    Parse {
        /// The variable that failed to parse.
        key: String,
        /// The underlying parse error.
        #[source]
        source: std::num::ParseIntError,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }

    /// Env var present but not a valid integer.
    pub fn parse(key: &str, source: std::num::ParseIntError) -> Self {
        ConfigError::Parse { key: key.to_string(), source }
    }
}
