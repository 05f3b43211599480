use std::process::{Command, Stdio};

use super::signal::ActiveProcess;
use super::ProcessError;
use crate::parser::Argv;

/// Runs external commands, one foreground process at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Spawns the program named by `argv` with inherited standard I/O
    /// and blocks until it exits. The child's pid is published in
    /// `active` for the signal relay while it is the foreground process
    /// and cleared again once it has been reaped.
    ///
    /// A spawn failure is a distinct error from a non-zero exit, so the
    /// caller can tell "could not launch" apart from "ran and failed".
    pub fn run(&self, argv: &Argv, active: &ActiveProcess) -> Result<(), ProcessError> {
        let Some(program) = argv.command() else {
            return Ok(());
        };

        let mut command = Command::new(program);
        command
            .args(argv.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProcessError::CommandNotFound(program.to_string()));
            }
            Err(e) => return Err(ProcessError::LaunchFailed(program.to_string(), e)),
        };

        active.set(child.id());
        let waited = child.wait();
        active.clear();

        let status = waited?;
        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ProcessError::Exited(program.to_string(), code)),
            None => Err(ProcessError::Signaled(program.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ArgvBuilder;

    fn argv(parts: &[&str]) -> Argv {
        let mut builder = ArgvBuilder::new();
        for part in parts {
            builder.append(part);
        }
        builder.finalize()
    }

    #[test]
    fn test_successful_command() {
        let executor = ProcessExecutor::new();
        let active = ActiveProcess::default();
        assert!(executor.run(&argv(&["true"]), &active).is_ok());
        assert_eq!(active.get(), None);
    }

    #[test]
    fn test_nonzero_exit_is_reported() {
        let executor = ProcessExecutor::new();
        let active = ActiveProcess::default();
        let result = executor.run(&argv(&["false"]), &active);
        assert!(matches!(result, Err(ProcessError::Exited(_, 1))));
    }

    #[test]
    fn test_exit_code_passes_through() {
        let executor = ProcessExecutor::new();
        let active = ActiveProcess::default();
        let result = executor.run(&argv(&["sh", "-c", "exit 3"]), &active);
        assert!(matches!(result, Err(ProcessError::Exited(_, 3))));
    }

    #[test]
    fn test_missing_program_is_launch_failure() {
        let executor = ProcessExecutor::new();
        let active = ActiveProcess::default();
        let result = executor.run(&argv(&["no-such-program-zz"]), &active);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
        assert_eq!(active.get(), None);
    }

    #[test]
    fn test_empty_argv_is_noop() {
        let executor = ProcessExecutor::new();
        let active = ActiveProcess::default();
        assert!(executor.run(&argv(&[]), &active).is_ok());
    }
}
