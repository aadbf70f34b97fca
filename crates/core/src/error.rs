use std::{io, path::PathBuf};

use thiserror::Error;

use crate::AdapterError;

#[derive(Debug, Error)]
pub enum Error {
    /// Cannot reach or authenticate to the server. Fatal wherever it
    /// occurs: probe, drop, any stage, or verification.
    #[error("failed to connect to database server")]
    Connect(#[source] AdapterError),

    /// A mandatory stage's script file does not exist. Raised before any
    /// statement of that stage executes.
    #[error("required script file not found: {path}")]
    MissingScript { path: PathBuf },

    #[error("failed to read script file {path}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A statement failed and was classified fatal. Names the stage and
    /// the truncated statement so the offending SQL can be located.
    #[error("stage `{stage}` failed at statement `{statement}`")]
    StatementFailed {
        stage: String,
        statement: String,
        #[source]
        source: AdapterError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
