//! Shell command execution with per-invocation log files.
//!
//! Each invocation owns one log file: a header naming the command and its
//! start time, the child's stderr streamed in while it runs, and a trailer
//! with the exit status and elapsed wall-clock time. Callers that want the
//! child's stdout use [`command_stdout`]; otherwise stdout is inherited.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use log::debug;

use crate::error::{CoreError, CoreResult};
use crate::logging;

/// Commands are opaque strings handed to the POSIX shell, so globbing,
/// pipes and redirections inside them are meaningful.
const SHELL: &str = "sh";

fn open_log(log_file: &Path) -> CoreResult<File> {
    File::create(log_file).map_err(|source| CoreError::LogFileOpen {
        path: log_file.to_path_buf(),
        source,
    })
}

/// Writes the log header and flushes it so the header precedes anything
/// the child writes through the redirected stderr descriptor.
fn write_header(log: &mut File, command: &str) -> CoreResult<()> {
    writeln!(log, "# {}", command)?;
    writeln!(log, "# running at {}", chrono::Local::now().format("%c"))?;
    log.flush()?;
    Ok(())
}

fn write_trailer(log: &mut File, status: i32, elapsed_secs: f64) -> CoreResult<()> {
    writeln!(
        log,
        "# exited with return code {} after {:.1} seconds",
        status, elapsed_secs
    )?;
    Ok(())
}

fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(command);
    cmd
}

fn trace_invocation(command: &str, log_file: &Path) {
    logging::log_message(&format!(
        "running command '{}', log in {}",
        command,
        log_file.display()
    ));
}

/// Runs a shell command, streaming its stderr into `log_file`.
///
/// The child's stdout is inherited from the calling process. Returns
/// `Ok(())` only for exit status 0; a non-zero exit (or a signal death,
/// reported as status -1) yields [`CoreError::CommandFailed`] naming the
/// command, status and log file. When `verbose` is set a trace line is
/// written to stderr before execution.
pub fn run_command(command: &str, log_file: &Path, verbose: bool) -> CoreResult<()> {
    if verbose {
        trace_invocation(command, log_file);
    }
    debug!(
        "running '{}' with stderr logged to {}",
        command,
        log_file.display()
    );

    let mut log = open_log(log_file)?;
    write_header(&mut log, command)?;

    let start = Instant::now();
    let status = shell_command(command)
        .stderr(Stdio::from(log.try_clone()?))
        .status()
        .map_err(|source| CoreError::CommandStart {
            command: command.to_string(),
            source,
        })?;
    let elapsed = start.elapsed().as_secs_f64();

    let code = status.code().unwrap_or(-1);
    write_trailer(&mut log, code, elapsed)?;

    if status.success() {
        Ok(())
    } else {
        Err(CoreError::CommandFailed {
            command: command.to_string(),
            status: code,
            log: log_file.to_path_buf(),
        })
    }
}

/// Runs a shell command and returns its captured stdout.
///
/// stderr is streamed into `log_file` as with [`run_command`]; the captured
/// stdout is appended to the log before the trailer so the file stays a
/// complete record of the invocation. On a non-zero exit the partial output
/// is still written to the log and embedded in the returned
/// [`CoreError::CommandFailedWithOutput`].
pub fn command_stdout(command: &str, log_file: &Path, verbose: bool) -> CoreResult<String> {
    if verbose {
        trace_invocation(command, log_file);
    }
    debug!(
        "capturing stdout of '{}' with stderr logged to {}",
        command,
        log_file.display()
    );

    let mut log = open_log(log_file)?;
    write_header(&mut log, command)?;

    let start = Instant::now();
    let output = shell_command(command)
        .stdout(Stdio::piped())
        .stderr(Stdio::from(log.try_clone()?))
        .output()
        .map_err(|source| CoreError::CommandStart {
            command: command.to_string(),
            source,
        })?;
    let elapsed = start.elapsed().as_secs_f64();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    writeln!(log, "{}", stdout)?;

    let code = output.status.code().unwrap_or(-1);
    write_trailer(&mut log, code, elapsed)?;

    if output.status.success() {
        Ok(stdout)
    } else {
        Err(CoreError::CommandFailedWithOutput {
            command: command.to_string(),
            status: code,
            log: log_file.to_path_buf(),
            output: stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_command_success() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("true.log");
        let result = run_command("true", &log, false);
        assert!(result.is_ok());

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.starts_with("# true\n"));
        assert!(contents.contains("# running at "));
        assert!(contents.contains("# exited with return code 0 after "));
    }

    #[test]
    fn test_run_command_failure() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("false.log");
        let result = run_command("exit 3", &log, false);
        match result.err().unwrap() {
            CoreError::CommandFailed { status, log: path, .. } => {
                assert_eq!(status, 3);
                assert_eq!(path, log);
            }
            e => panic!("Unexpected error type: {:?}", e),
        }

        // Trailer still records the real status
        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("# exited with return code 3 after "));
    }

    #[test]
    fn test_run_command_stderr_goes_to_log() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("stderr.log");
        run_command("echo oops >&2", &log, false).unwrap();

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("oops"));
    }

    #[test]
    fn test_command_stdout_captures_output() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("stdout.log");
        let output = command_stdout("echo hello", &log, false).unwrap();
        assert_eq!(output, "hello\n");

        // Captured stdout is appended to the log for audit
        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("hello"));
        assert!(contents.contains("# exited with return code 0 after "));
    }

    #[test]
    fn test_command_stdout_failure_embeds_output() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("partial.log");
        let result = command_stdout("echo partial; exit 2", &log, false);
        match result.err().unwrap() {
            CoreError::CommandFailedWithOutput { status, output, .. } => {
                assert_eq!(status, 2);
                assert_eq!(output, "partial\n");
            }
            e => panic!("Unexpected error type: {:?}", e),
        }

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(contents.contains("partial"));
        assert!(contents.contains("# exited with return code 2 after "));
    }

    #[test]
    fn test_unwritable_log_file() {
        let result = run_command("true", Path::new("/nonexistent-dir/x.log"), false);
        match result.err().unwrap() {
            CoreError::LogFileOpen { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent-dir/x.log"));
            }
            e => panic!("Unexpected error type: {:?}", e),
        }
    }
}
