use std::ffi::{CStr, CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ExpandError {
    UserNotFound(String),
}

impl std::fmt::Display for ExpandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpandError::UserNotFound(name) => {
                write!(f, "Could not find home directory for user {}", name)
            }
        }
    }
}

impl std::error::Error for ExpandError {}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Home directory of `name`, from the user database.
    pub fn user_home(&self, name: &str) -> Result<PathBuf, ExpandError> {
        let c_name =
            CString::new(name).map_err(|_| ExpandError::UserNotFound(name.to_string()))?;
        // getpwnam hands back a static entry; the shell only asks from
        // the parser's thread, one lookup at a time.
        let entry = unsafe { libc::getpwnam(c_name.as_ptr()) };
        if entry.is_null() {
            return Err(ExpandError::UserNotFound(name.to_string()));
        }
        let dir = unsafe { CStr::from_ptr((*entry).pw_dir) };
        Ok(PathBuf::from(OsStr::from_bytes(dir.to_bytes())))
    }

    /// Replaces a leading home prefix with `~` for prompt display.
    pub fn abbreviate(&self, path: &Path, home: &Path) -> String {
        match path.strip_prefix(home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    }
}
