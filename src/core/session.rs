use crate::error::ShellError;
use crate::process::signal::ActiveProcess;
use std::env;
use std::path::{Path, PathBuf};

/// Outcome flag for the line currently being parsed.
///
/// `Okay` is the reset state at the start of every line. `Error` is
/// sticky for the rest of the line and suppresses history recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Okay,
    Error,
    Finished,
    Blank,
}

/// Interpreter-lifetime state threaded through the parser and the
/// dispatcher, replacing the globals of a classic C shell.
pub struct Session {
    home: PathBuf,
    old_pwd: PathBuf,
    keep_alive: bool,
    status: SessionStatus,
    active_command: ActiveProcess,
}

impl Session {
    /// Reads the home directory once; it stays fixed for the session.
    pub fn new() -> Result<Self, ShellError> {
        let home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
        let old_pwd = env::current_dir()?;
        Ok(Self::with_home(home, old_pwd))
    }

    pub fn with_home(home: PathBuf, old_pwd: PathBuf) -> Self {
        Self {
            home,
            old_pwd,
            keep_alive: true,
            status: SessionStatus::Okay,
            active_command: ActiveProcess::default(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn old_pwd(&self) -> &Path {
        &self.old_pwd
    }

    pub fn set_old_pwd(&mut self, path: PathBuf) {
        self.old_pwd = path;
    }

    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    pub fn request_exit(&mut self) {
        self.keep_alive = false;
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn begin_line(&mut self) {
        self.status = SessionStatus::Okay;
    }

    pub fn mark_error(&mut self) {
        self.status = SessionStatus::Error;
    }

    /// A `;`-terminated sub-command completed. Never clears `Error`.
    pub fn mark_finished(&mut self) {
        if self.status != SessionStatus::Error {
            self.status = SessionStatus::Finished;
        }
    }

    /// The line held nothing but whitespace.
    pub fn mark_blank(&mut self) {
        if self.status == SessionStatus::Okay {
            self.status = SessionStatus::Blank;
        }
    }

    pub fn records_history(&self) -> bool {
        self.status != SessionStatus::Error
    }

    /// Shared cell the signal relay reads to find the foreground command.
    pub fn active_command(&self) -> &ActiveProcess {
        &self.active_command
    }
}
