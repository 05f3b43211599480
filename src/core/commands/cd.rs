use super::CommandError;
use crate::core::session::Session;
use std::env;
use std::path::Path;

/// Changes the working directory with the old_pwd swap discipline: the
/// pre-change directory becomes the new old_pwd before the attempt, and
/// a failed change puts the previous value back so `back` still points
/// where it did.
pub(super) fn change_dir(session: &mut Session, target: &Path) -> Result<(), CommandError> {
    // `back` passes a clone of old_pwd, so the swap below cannot pull
    // the target out from under us.
    let previous = session.old_pwd().to_path_buf();

    match env::current_dir() {
        Ok(cwd) => session.set_old_pwd(cwd),
        Err(e) => return Err(CommandError::DirectoryChange(target.display().to_string(), e)),
    }

    if let Err(e) = env::set_current_dir(target) {
        session.set_old_pwd(previous);
        return Err(CommandError::DirectoryChange(target.display().to_string(), e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn session() -> Session {
        Session::with_home(PathBuf::from("/"), PathBuf::from("/"))
    }

    // The working directory is process-global, so the whole success
    // sequence lives in one test.
    #[test]
    fn test_change_and_back() {
        let mut session = session();
        let start = env::current_dir().expect("cwd");
        let temp = env::temp_dir().canonicalize().expect("temp");

        change_dir(&mut session, &temp).expect("cd temp");
        assert_eq!(env::current_dir().expect("cwd"), temp);
        assert_eq!(session.old_pwd(), start.as_path());

        // back: swaps cwd and old_pwd.
        let target = session.old_pwd().to_path_buf();
        change_dir(&mut session, &target).expect("cd back");
        assert_eq!(env::current_dir().expect("cwd"), start);
        assert_eq!(session.old_pwd(), temp.as_path());
    }

    #[test]
    fn test_failed_change_restores_old_pwd() {
        let mut session = session();
        session.set_old_pwd(PathBuf::from("/somewhere/previous"));
        let before = env::current_dir().expect("cwd");

        let result = change_dir(&mut session, Path::new("/no/such/directory"));

        assert!(matches!(result, Err(CommandError::DirectoryChange(_, _))));
        assert_eq!(env::current_dir().expect("cwd"), before);
        assert_eq!(session.old_pwd(), Path::new("/somewhere/previous"));
    }
}
