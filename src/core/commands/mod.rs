mod cd;

use std::path::PathBuf;

use crate::core::session::Session;
use crate::parser::{Argv, Dispatch};
use crate::process::executor::ProcessExecutor;
use crate::process::redirect::{Redirect, RedirectGuard};
use crate::process::ProcessError;

/// Builtin names, matched verbatim against the first argument.
pub const CMD_EXIT: &str = "exit";
pub const CMD_CD: &str = "cd";
pub const CMD_BACK: &str = "back";

#[derive(Debug)]
pub enum CommandError {
    DirectoryChange(String, std::io::Error),
    Redirect(PathBuf, std::io::Error),
    Process(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::DirectoryChange(target, e) => write!(f, "cd: {}: {}", target, e),
            CommandError::Redirect(path, e) => {
                write!(f, "cannot redirect {}: {}", path.display(), e)
            }
            CommandError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl std::error::Error for CommandError {}

/// Resolves each frozen argument vector to a builtin or an external
/// process. Builtins never fork; external commands run to completion
/// before control returns to the scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandExecutor {
    process: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self {
            process: ProcessExecutor::new(),
        }
    }

    pub fn is_builtin(name: &str) -> bool {
        matches!(name, CMD_EXIT | CMD_CD | CMD_BACK)
    }
}

impl Dispatch for CommandExecutor {
    fn dispatch(
        &mut self,
        session: &mut Session,
        argv: Argv,
        redirect: Option<Redirect>,
    ) -> Result<(), CommandError> {
        let Some(name) = argv.command() else {
            return Ok(());
        };

        // The guard must be live before anything runs and is dropped on
        // every path out of this function, restoring the descriptor. A
        // file that cannot be opened means the command never executes.
        let _guard = match &redirect {
            Some(r) => Some(
                RedirectGuard::apply(r).map_err(|e| CommandError::Redirect(r.path.clone(), e))?,
            ),
            None => None,
        };

        match name {
            CMD_EXIT => {
                session.request_exit();
                Ok(())
            }
            CMD_CD => {
                let target = argv
                    .args()
                    .first()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| session.home().to_path_buf());
                cd::change_dir(session, &target)
            }
            CMD_BACK => {
                let target = session.old_pwd().to_path_buf();
                cd::change_dir(session, &target)
            }
            _ => self
                .process
                .run(&argv, session.active_command())
                .map_err(CommandError::from),
        }
    }
}
