use std::path::PathBuf;

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to access {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Failed to process CSV {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("{path:?} has no \"{column}\" column in its header.")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Failed to parse config at {path:?}: {source}")]
    ParseConfig { path: PathBuf, source: toml::de::Error },
    #[error("Config file already exists at {path:?}.")]
    ConfigExists { path: PathBuf },
    #[error("HOME environment variable not set.")]
    NoHome,
    #[error("Sort variants produced different record sets ({0}).")]
    VariantsDisagree(String),
    #[error(transparent)]
    Rank(#[from] bayesrank_core::RankError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        CliError::Csv { path: path.into(), source }
    }
}
