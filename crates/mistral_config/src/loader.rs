//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{ArchConfig, CLKBUF_SUB_INDEX_COUNT};
use std::collections::HashSet;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "mistral.toml";

/// Loads and validates `mistral.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<ArchConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ArchConfig, ConfigError> {
    let config: ArchConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ArchConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for &z in &config.clkbuf.sub_indices {
        if z >= CLKBUF_SUB_INDEX_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "clkbuf sub-index {z} out of range (device has {CLKBUF_SUB_INDEX_COUNT})"
            )));
        }
        if !seen.insert(z) {
            return Err(ConfigError::ValidationError(format!(
                "clkbuf sub-index {z} listed twice"
            )));
        }
    }
    if config.timing.default_pip_delay_ps < 0 {
        return Err(ConfigError::ValidationError(format!(
            "default_pip_delay_ps must be non-negative, got {}",
            config.timing.default_pip_delay_ps
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.clkbuf.sub_indices, vec![2]);
        assert!(config.primitives.dsp);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[device]
name = "5CSEBA6U23I7"

[primitives]
dsp = true
clkbuf = true
hps = false
control = true

[clkbuf]
sub_indices = [0, 2]

[timing]
default_pip_delay_ps = 250
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.device.name.as_deref(), Some("5CSEBA6U23I7"));
        assert!(!config.primitives.hps);
        assert_eq!(config.clkbuf.sub_indices, vec![0, 2]);
        assert_eq!(config.timing.default_pip_delay_ps, 250);
    }

    #[test]
    fn sub_index_out_of_range() {
        let err = load_config_from_str("[clkbuf]\nsub_indices = [4]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(format!("{err}").contains("out of range"));
    }

    #[test]
    fn duplicate_sub_index() {
        let err = load_config_from_str("[clkbuf]\nsub_indices = [2, 2]\n").unwrap_err();
        assert!(format!("{err}").contains("listed twice"));
    }

    #[test]
    fn negative_delay_rejected() {
        let err = load_config_from_str("[timing]\ndefault_pip_delay_ps = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_section_is_parse_error() {
        let err = load_config_from_str("[router]\nfoo = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn empty_sub_indices_allowed() {
        let config = load_config_from_str("[clkbuf]\nsub_indices = []\n").unwrap();
        assert!(config.clkbuf.sub_indices.is_empty());
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[primitives]\ncontrol = false\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(!config.primitives.control);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
