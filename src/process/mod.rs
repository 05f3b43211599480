use std::fmt;

pub mod executor;
pub mod redirect;
pub mod signal;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    LaunchFailed(String, std::io::Error),
    Exited(String, i32),
    Signaled(String),
    SignalError(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::LaunchFailed(cmd, e) => write!(f, "could not launch {}: {}", cmd, e),
            ProcessError::Exited(cmd, code) => {
                write!(f, "{} exited with status {}", cmd, code)
            }
            ProcessError::Signaled(cmd) => write!(f, "{} was terminated by a signal", cmd),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
