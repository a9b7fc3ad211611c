use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteadyStateError {
    #[error("Invalid detector configuration: {0}")]
    InvalidConfig(String),

    #[error("Sequence of {len} samples is too short for a single window (stride {stride})")]
    SequenceTooShort { len: usize, stride: usize },

    #[error("Failed to parse run file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SteadyStateError>;
