// Error taxonomy for the task tracker

use crate::models::TaskId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// No task carries the requested id
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Writing the CSV export failed; any partial file is left in place
    #[error("failed to export tasks to {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config from {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TaskError>;
