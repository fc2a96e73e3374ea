use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Error marshalling JSON: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("Couldn't write output file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read overwrite confirmation: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },
    #[error("Refused to overwrite existing output file '{path}'.")]
    OverwriteDeclined { path: PathBuf },
}
