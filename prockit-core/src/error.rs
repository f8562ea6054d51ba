use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for prockit
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error opening log file {} for writing: {source}", .path.display())]
    LogFileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to start command '{command}': {source}")]
    CommandStart {
        command: String,
        source: std::io::Error,
    },

    #[error("command {command} exited with status {status}, output is in {}", .log.display())]
    CommandFailed {
        command: String,
        status: i32,
        log: PathBuf,
    },

    #[error("command {command} exited with status {status}, stderr is in {} (output is: {output})", .log.display())]
    CommandFailedWithOutput {
        command: String,
        status: i32,
        log: PathBuf,
        output: String,
    },

    #[error("invalid memory size string: {0}")]
    MemoryParse(String),

    #[error("memory for each of the {n} partitions is only {per_partition}; please specify a larger total")]
    MemoryTooSmall { n: u64, per_partition: String },

    #[error("invalid memory size format '{0}'; see 'man sort' for how buffer sizes are written")]
    MemoryFormat(String),
}

/// Result type for prockit operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
