pub type Result<T, E = RankError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("Cannot compute the global prior of an empty dataset.")]
    EmptyDataset,
    #[error("Unknown sort algorithm \"{0}\". Use \"exchange\", \"partition\" or \"heap-select\".")]
    InvalidAlgorithmSelection(String),
    #[error("Smoothing constant must be finite and greater than zero, got {0}.")]
    InvalidSmoothing(f64),
}
