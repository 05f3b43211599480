use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// How a single command's standard I/O is rebound to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>`: stdout to the file, truncating.
    Truncate,
    /// `>>`: stdout to the file, appending.
    Append,
    /// `<`: stdin from the file.
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: PathBuf,
    pub kind: RedirectKind,
}

impl RedirectKind {
    fn open_flags(self) -> i32 {
        match self {
            RedirectKind::Truncate => libc::O_CREAT | libc::O_WRONLY | libc::O_TRUNC,
            RedirectKind::Append => libc::O_CREAT | libc::O_WRONLY | libc::O_APPEND,
            RedirectKind::Input => libc::O_RDONLY,
        }
    }

    fn target_fd(self) -> i32 {
        match self {
            RedirectKind::Input => libc::STDIN_FILENO,
            RedirectKind::Truncate | RedirectKind::Append => libc::STDOUT_FILENO,
        }
    }
}

/// Retargets stdin or stdout at a file for the guard's lifetime.
///
/// `Drop` restores the saved descriptor and closes both fds, so the
/// original target comes back on success and error paths alike.
pub struct RedirectGuard {
    file_fd: i32,
    saved_fd: i32,
    target_fd: i32,
}

impl RedirectGuard {
    pub fn apply(redirect: &Redirect) -> Result<Self, std::io::Error> {
        let path = CString::new(redirect.path.as_os_str().as_bytes())
            .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;

        let file_fd = unsafe { libc::open(path.as_ptr(), redirect.kind.open_flags(), 0o644) };
        if file_fd < 0 {
            return Err(std::io::Error::last_os_error());
        }

        let target_fd = redirect.kind.target_fd();
        let saved_fd = unsafe { libc::dup(target_fd) };
        if saved_fd < 0 {
            let err = std::io::Error::last_os_error();
            unsafe { libc::close(file_fd) };
            return Err(err);
        }

        if unsafe { libc::dup2(file_fd, target_fd) } < 0 {
            let err = std::io::Error::last_os_error();
            unsafe {
                libc::close(file_fd);
                libc::close(saved_fd);
            }
            return Err(err);
        }

        Ok(Self {
            file_fd,
            saved_fd,
            target_fd,
        })
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        unsafe {
            libc::dup2(self.saved_fd, self.target_fd);
            libc::close(self.saved_fd);
            libc::close(self.file_fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // Raw descriptor writes: println! goes through the test harness
    // capture buffer, the guard rebinds the real fd underneath it.
    fn write_stdout(bytes: &[u8]) {
        unsafe {
            libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len());
        }
    }

    #[test]
    fn test_truncate_then_restore() {
        let path = std::env::temp_dir().join("venule_redirect_trunc");
        let redirect = Redirect {
            path: path.clone(),
            kind: RedirectKind::Truncate,
        };

        {
            let _guard = RedirectGuard::apply(&redirect).expect("apply");
            write_stdout(b"hi\n");
        }

        assert_eq!(fs::read_to_string(&path).expect("read"), "hi\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_append_accumulates() {
        let path = std::env::temp_dir().join("venule_redirect_append");
        fs::remove_file(&path).ok();
        let redirect = Redirect {
            path: path.clone(),
            kind: RedirectKind::Append,
        };

        for _ in 0..2 {
            let _guard = RedirectGuard::apply(&redirect).expect("apply");
            write_stdout(b"line\n");
        }

        assert_eq!(fs::read_to_string(&path).expect("read"), "line\nline\n");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_input_rebinds_stdin() {
        let path = std::env::temp_dir().join("venule_redirect_input");
        fs::write(&path, b"from file").expect("write");
        let redirect = Redirect {
            path: path.clone(),
            kind: RedirectKind::Input,
        };

        let mut buf = [0u8; 16];
        let n;
        {
            let _guard = RedirectGuard::apply(&redirect).expect("apply");
            n = unsafe {
                libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len())
            };
        }

        assert_eq!(&buf[..n as usize], b"from file");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_open_failure_is_reported() {
        let redirect = Redirect {
            path: PathBuf::from("/nonexistent-dir/venule/out"),
            kind: RedirectKind::Truncate,
        };
        assert!(RedirectGuard::apply(&redirect).is_err());
    }
}
