use crate::core::session::Session;
use crate::path::PathExpander;
use std::env;

/// Upper bound on the rendered prompt, including the trailing marker.
pub const PROMPT_MAX_SIZE: usize = 256;

/// Current directory with the home prefix abbreviated to `~`.
pub fn render(session: &Session) -> String {
    let cwd = env::current_dir().unwrap_or_else(|_| session.home().to_path_buf());
    let shown = PathExpander::new().abbreviate(&cwd, session.home());
    clamp(format!("{} > ", shown))
}

/// Cuts an over-long prompt at the last char boundary within the size
/// bound; a byte-index truncate would panic mid-character on non-ASCII
/// paths.
fn clamp(mut prompt: String) -> String {
    if prompt.len() > PROMPT_MAX_SIZE {
        let mut cut = PROMPT_MAX_SIZE;
        while !prompt.is_char_boundary(cut) {
            cut -= 1;
        }
        prompt.truncate(cut);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_home_is_abbreviated() {
        let cwd = env::current_dir().expect("cwd");
        let session = Session::with_home(cwd.clone(), cwd);
        assert_eq!(render(&session), "~ > ");
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        // 2-byte chars put every odd byte index mid-character.
        let long = "é".repeat(PROMPT_MAX_SIZE);
        let clamped = clamp(long);
        assert!(clamped.len() <= PROMPT_MAX_SIZE);
        assert!(clamped.chars().all(|c| c == 'é'));

        let short = clamp("~ > ".to_string());
        assert_eq!(short, "~ > ");
    }

    #[test]
    fn test_outside_home_is_verbatim() {
        let cwd = env::current_dir().expect("cwd");
        let session = Session::with_home(PathBuf::from("/definitely/elsewhere"), cwd.clone());
        assert_eq!(render(&session), format!("{} > ", cwd.display()));
    }
}
