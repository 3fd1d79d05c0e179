//! Errors raised while reading `mistral.toml`.

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read mistral.toml: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML or has unknown keys.
    #[error("malformed mistral.toml: {0}")]
    ParseError(String),

    /// A value is syntactically fine but not acceptable.
    #[error("invalid mistral.toml: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = ConfigError::ValidationError("clkbuf sub-index 4 out of range".into());
        assert_eq!(
            err.to_string(),
            "invalid mistral.toml: clkbuf sub-index 4 out of range"
        );
        let err = ConfigError::ParseError("unknown field `router`".into());
        assert!(err.to_string().starts_with("malformed mistral.toml:"));
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> Result<String, ConfigError> {
            Ok(std::fs::read_to_string("/nonexistent/mistral.toml")?)
        }
        let err = read().unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(err.to_string().starts_with("cannot read mistral.toml:"));
    }
}
