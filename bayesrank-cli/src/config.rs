//! Config file loading and creation for the bayesrank CLI.
//!
//! Config lives at ~/.config/bayesrank/config.toml.
//! All fields are optional: CLI args override config values, config values
//! override built-in defaults.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BayesrankConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub algorithm: Option<String>,
    pub smoothing: Option<f64>,
    pub top_n: Option<usize>,
    pub log_level: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# bayesrank configuration
# All values here can be overridden by CLI flags.

# Processed dataset (Organization,Rating,NumberReview)
# input = \"datos_procesados.csv\"

# Where the ranked CSV is written
# output = \"restaurantes_ordenados.csv\"

# Sort variant: \"exchange\", \"partition\" or \"heap-select\"
# algorithm = \"partition\"

# Smoothing constant m: virtual review count pulling sparse records
# towards the global mean rating
# smoothing = 100.0

# Unique names shown in the top-N report
# top_n = 20

# Log filter (RUST_LOG syntax). RUST_LOG and -v take precedence.
# log_level = \"info\"
";

/// Returns the default config path: ~/.config/bayesrank/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| CliError::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join("bayesrank").join("config.toml"))
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> Result<BayesrankConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .map_err(|source| CliError::ParseConfig { path: path.to_path_buf(), source }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BayesrankConfig::default()),
        Err(e) => Err(CliError::io(path, e)),
    }
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CliError::ConfigExists { path: path.to_path_buf() });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| CliError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, BayesrankConfig::default());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let cfg: BayesrankConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(cfg, BayesrankConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "algorithm = \"heap-select\"\nsmoothing = 250.0\ntop_n = 5\ninput = \"data.csv\"\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.algorithm.as_deref(), Some("heap-select"));
        assert_eq!(cfg.smoothing, Some(250.0));
        assert_eq!(cfg.top_n, Some(5));
        assert_eq!(cfg.input.as_deref(), Some("data.csv"));
        assert!(cfg.output.is_none());
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "smoothnig = 10.0\n").unwrap();
        assert!(matches!(load_config(&path), Err(CliError::ParseConfig { .. })));
    }

    #[test]
    fn test_create_default_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        create_default_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(load_config(&path).unwrap(), BayesrankConfig::default());

        assert!(matches!(create_default_config(&path), Err(CliError::ConfigExists { .. })));
    }
}
