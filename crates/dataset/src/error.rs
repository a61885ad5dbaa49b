use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV parse error at line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid date '{value}' at line {line}, expected YYYY-MM-DD")]
    InvalidDate { line: u64, value: String },

    #[error("Dataset contains no rows")]
    Empty,
}
