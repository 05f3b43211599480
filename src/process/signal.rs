use super::ProcessError;
use std::io::Write;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Pid cell for the foreground command, shared between the dispatcher
/// and the interrupt relay. Zero means nothing is running.
#[derive(Debug, Clone, Default)]
pub struct ActiveProcess {
    pid: Arc<AtomicI32>,
}

impl ActiveProcess {
    pub fn set(&self, pid: u32) {
        self.pid.store(pid as i32, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.pid.store(0, Ordering::SeqCst);
    }

    pub fn get(&self) -> Option<i32> {
        match self.pid.load(Ordering::SeqCst) {
            0 => None,
            pid => Some(pid),
        }
    }

    /// Forwards SIGINT to the registered process, then probes whether it
    /// is still there. Returns true only if a live process took the
    /// signal, so the caller can fall back to the prompt path.
    pub fn interrupt(&self) -> bool {
        match self.get() {
            Some(pid) => unsafe {
                libc::kill(pid, libc::SIGINT) == 0 && libc::kill(pid, 0) == 0
            },
            None => false,
        }
    }
}

/// Installs the session-lifetime SIGINT relay.
///
/// Stage one forwards the interrupt to the foreground command. When no
/// live command receives it (none running, or it exited in the same
/// instant) the interrupt belongs to the prompt: the line reader raises
/// its own Interrupted outcome for keyboard input, and a bare newline
/// keeps an externally delivered SIGINT from mangling the display.
pub fn install_relay(command: ActiveProcess) -> Result<(), ProcessError> {
    ctrlc::set_handler(move || {
        if !command.interrupt() {
            let _ = std::io::stdout().write_all(b"\n");
        }
    })
    .map_err(|e| ProcessError::SignalError(e.to_string()))
}
