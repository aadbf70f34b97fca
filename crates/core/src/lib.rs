mod adapter;
mod classify;
mod config;
mod error;
mod executor;
mod pipeline;
mod splitter;
mod stage;
mod verify;

pub use adapter::{AdapterError, Connector, DatabaseAdapter, SQL_PREVIEW_LEN, truncate_sql};
pub use classify::{Disposition, classify};
pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use executor::{Executor, SkippedStatement, StageStats};
pub use pipeline::{
    NullSink, PipelineReport, ProgressSink, Provisioner, StageOutcome, StageReport,
};
pub use splitter::split;
pub use stage::{Requirement, STAGES, Stage, StageRunner};
pub use verify::{VerificationReport, VerifyOptions, verify};
