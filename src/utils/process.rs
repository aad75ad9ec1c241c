use crate::error::AppError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Captured result of a finished child process
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Last lines of stderr, or the exit status when stderr is empty
    pub fn failure_summary(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            return format!("exited with {}", self.status);
        }
        let last_lines: Vec<&str> = stderr.lines().rev().take(5).collect();
        last_lines.into_iter().rev().collect::<Vec<_>>().join("\n")
    }
}

/// Run a program to completion with no stdin, capturing stdout and stderr
pub fn run<I, S>(program: &Path, args: I) -> Result<ProcessOutput, AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!("Running {:?}", command);

    // output() drains both pipes concurrently before waiting
    let output = command.output().map_err(|e| AppError::Spawn {
        program: program.display().to_string(),
        source: e,
    })?;

    debug!("{} exited with {}", program.display(), output.status);
    Ok(ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_both_streams() {
        let output = run(
            Path::new("/bin/sh"),
            ["-c", "echo out; echo err >&2; exit 3"],
        )
        .unwrap();
        assert!(!output.success());
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.failure_summary(), "err");
    }

    #[test]
    fn test_stdin_is_not_attached() {
        let output = run(Path::new("/bin/sh"), ["-c", "cat; echo done"]).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "done\n");
    }

    #[test]
    fn test_large_output_does_not_deadlock() {
        let script = "i=0; while [ $i -lt 20000 ]; do \
                      echo line-$i; echo err-$i >&2; i=$((i+1)); \
                      done";
        let output = run(Path::new("/bin/sh"), ["-c", script]).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.lines().count(), 20000);
        assert_eq!(output.stderr.lines().count(), 20000);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run(Path::new("/nonexistent/changelang-tool"), ["-h"]).unwrap_err();
        assert!(matches!(err, AppError::Spawn { .. }));
    }
}
