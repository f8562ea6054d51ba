//! Core library for orchestrating shell commands from pipeline scripts.
//!
//! This crate provides command execution with per-invocation log files,
//! memory-size string arithmetic for dividing a budget across parallel
//! workers, and scoped environment-variable overrides.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use prockit_core::{command_stdout, divide_memory, run_command, ScopedEnv};
//! use std::path::Path;
//!
//! let _env = ScopedEnv::new([("LC_ALL", "C")]);
//!
//! // Each worker of a 4-way split gets a quarter of the sort buffer.
//! let per_worker = divide_memory("10G", 4).unwrap();
//! run_command(
//!     &format!("sort --buffer-size={} -o sorted.txt input.txt", per_worker),
//!     Path::new("logs/sort.log"),
//!     true,
//! )
//! .unwrap();
//!
//! let count = command_stdout("wc -l < sorted.txt", Path::new("logs/wc.log"), false).unwrap();
//! println!("{} lines", count.trim());
//! ```
//!
//! Every operation returns a [`CoreResult`]; nothing here terminates the
//! process. Binaries built on this crate own the decision to abort on
//! failure (see the `prockit` CLI).

pub mod command;
pub mod env;
pub mod error;
pub mod logging;
pub mod memory;
pub mod utils;

// Re-exports for public API
pub use command::{command_stdout, run_command};
pub use env::ScopedEnv;
pub use error::{CoreError, CoreResult};
pub use logging::{log_message, program_name};
pub use memory::{divide_memory, MemorySize};
pub use utils::touch_file;
