//! Error taxonomy for the evaluation engine.

/// Errors raised while loading and reducing scenario datasets.
///
/// `MissingData` and `DataQuality` are recoverable per scenario: the
/// pipeline records them against the scenario key and keeps going.
/// `Configuration` is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("no usable dataset at {path}")]
    MissingData { path: String },

    #[error("malformed {column} value {value:?} in row {row}")]
    DataQuality {
        row: usize,
        column: String,
        value: String,
    },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
