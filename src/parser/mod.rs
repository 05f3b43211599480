mod argv;
pub mod state;

pub use argv::{Argv, ArgvBuilder};

use crate::core::commands::CommandError;
use crate::core::session::{Session, SessionStatus};
use crate::path::{ExpandError, PathExpander};
use crate::process::redirect::{Redirect, RedirectKind};
use std::path::PathBuf;

use state::{ParseMode, StateStack};

#[derive(Debug)]
pub enum ParseError {
    StateOverflow,
    StateUnderflow,
    Expand(ExpandError),
}

impl From<ExpandError> for ParseError {
    fn from(err: ExpandError) -> Self {
        ParseError::Expand(err)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::StateOverflow => write!(f, "quoting nested too deeply"),
            ParseError::StateUnderflow => write!(f, "closing quote without a matching open"),
            ParseError::Expand(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {}

/// Receives each sub-command the moment its argument vector is frozen,
/// so execute-as-you-parse ordering is preserved across `;` sequences.
pub trait Dispatch {
    fn dispatch(
        &mut self,
        session: &mut Session,
        argv: Argv,
        redirect: Option<Redirect>,
    ) -> Result<(), CommandError>;
}

/// Character-level scanner over one input line.
///
/// Owns the in-progress token, the argument vector under construction
/// and the lexical mode stack; all three are reset at the start of each
/// line and only ever touched from this synchronous scan.
pub struct Parser {
    stack: StateStack,
    token: String,
    builder: ArgvBuilder,
    expander: PathExpander,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            stack: StateStack::new(),
            token: String::new(),
            builder: ArgvBuilder::new(),
            expander: PathExpander::new(),
        }
    }

    /// Scans `input` left to right, handing every completed sub-command
    /// to `dispatcher`. Returns the first error of the line; the rest of
    /// the line is not parsed once the session status turns `Error`.
    pub fn parse_line<D: Dispatch>(
        &mut self,
        input: &str,
        session: &mut Session,
        dispatcher: &mut D,
    ) -> Result<(), crate::error::ShellError> {
        self.begin_line(session);

        let chars: Vec<char> = input.chars().collect();
        let mut first_error: Option<crate::error::ShellError> = None;
        let mut i = 0;

        while i < chars.len()
            && session.status() != SessionStatus::Error
            && session.keep_alive()
        {
            let c = chars[i];
            match self.stack.current() {
                ParseMode::InQuotes(delim) => {
                    // Whitespace, escapes and the other quote kind are
                    // all literal in here.
                    if c == delim {
                        if let Err(e) = self.stack.pop() {
                            session.mark_error();
                            first_error.get_or_insert(e.into());
                        }
                    } else {
                        self.token.push(c);
                    }
                }
                ParseMode::Normal => match c {
                    ' ' => self.commit_token(),
                    '\n' => break,
                    '\\' => {
                        // Next character is literal, the backslash is dropped.
                        i += 1;
                        if let Some(&next) = chars.get(i) {
                            self.token.push(next);
                        }
                    }
                    '"' | '\'' => {
                        if let Err(e) = self.stack.push(ParseMode::InQuotes(c)) {
                            session.mark_error();
                            first_error.get_or_insert(e.into());
                        }
                    }
                    ';' => match self.run_dispatch(session, dispatcher, None) {
                        Ok(()) => session.mark_finished(),
                        Err(e) => {
                            session.mark_error();
                            first_error.get_or_insert(e.into());
                        }
                    },
                    '~' => {
                        if let Err(e) = self.expand_tilde(&chars, &mut i, session) {
                            session.mark_error();
                            first_error.get_or_insert(ParseError::from(e).into());
                        }
                    }
                    '>' | '<' => {
                        let redirect = Self::scan_redirect(&chars, &mut i);
                        match self.run_dispatch(session, dispatcher, Some(redirect)) {
                            Ok(()) => session.mark_finished(),
                            Err(e) => {
                                session.mark_error();
                                first_error.get_or_insert(e.into());
                            }
                        }
                    }
                    _ => self.token.push(c),
                },
            }
            i += 1;
        }

        // Whatever is still pending at end of line is one last command,
        // unless the line errored out, exited, or held nothing at all.
        if session.status() != SessionStatus::Error && session.keep_alive() {
            if !self.token.is_empty() || !self.builder.is_empty() {
                if let Err(e) = self.run_dispatch(session, dispatcher, None) {
                    session.mark_error();
                    first_error.get_or_insert(e.into());
                }
            } else if session.status() == SessionStatus::Okay {
                session.mark_blank();
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn begin_line(&mut self, session: &mut Session) {
        self.stack.clear();
        self.token.clear();
        self.builder = ArgvBuilder::new();
        session.begin_line();
    }

    fn commit_token(&mut self) {
        if !self.token.is_empty() {
            self.builder.append(&self.token);
            self.token.clear();
        }
    }

    /// Commits the pending token, freezes the vector and hands it over.
    /// The builder is replaced so the next sub-command starts empty.
    fn run_dispatch<D: Dispatch>(
        &mut self,
        session: &mut Session,
        dispatcher: &mut D,
        redirect: Option<Redirect>,
    ) -> Result<(), CommandError> {
        self.commit_token();
        let argv = std::mem::take(&mut self.builder).finalize();
        dispatcher.dispatch(session, argv, redirect)
    }

    /// `~` or `~user`, appended into the current token. On a found user
    /// the scan index is advanced past the consumed name.
    fn expand_tilde(
        &mut self,
        chars: &[char],
        i: &mut usize,
        session: &Session,
    ) -> Result<(), ExpandError> {
        let start = *i + 1;
        let mut end = start;
        while end < chars.len() && !matches!(chars[end], '/' | ';' | '>' | ' ' | '\n') {
            end += 1;
        }

        if end == start {
            self.token.push_str(&session.home().to_string_lossy());
            return Ok(());
        }

        let username: String = chars[start..end].iter().collect();
        let home = self.expander.user_home(&username)?;
        self.token.push_str(&home.to_string_lossy());
        *i = end - 1;
        Ok(())
    }

    /// Reads `>`, `>>` or `<` plus the destination keyword that follows,
    /// leaving the scan index on the last consumed character.
    fn scan_redirect(chars: &[char], i: &mut usize) -> Redirect {
        let kind = if chars[*i] == '<' {
            RedirectKind::Input
        } else if chars.get(*i + 1) == Some(&'>') {
            *i += 1;
            RedirectKind::Append
        } else {
            RedirectKind::Truncate
        };

        let mut j = *i + 1;
        while chars.get(j) == Some(&' ') {
            j += 1;
        }
        let start = j;
        while j < chars.len() && !matches!(chars[j], ';' | ' ' | '\n') {
            j += 1;
        }
        let path: String = chars[start..j].iter().collect();
        *i = j.saturating_sub(1);

        Redirect {
            path: PathBuf::from(path),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessError;
    use std::path::PathBuf;

    /// Records every dispatched vector instead of running anything.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Vec<String>, Option<Redirect>)>,
        fail_on: Option<String>,
    }

    impl Dispatch for Recorder {
        fn dispatch(
            &mut self,
            session: &mut Session,
            argv: Argv,
            redirect: Option<Redirect>,
        ) -> Result<(), CommandError> {
            if argv.command() == Some("exit") {
                session.request_exit();
            }
            let failing = self.fail_on.as_deref() == argv.command();
            let name = argv.command().unwrap_or("").to_string();
            self.calls.push((argv.as_slice().to_vec(), redirect));
            if failing {
                return Err(CommandError::Process(ProcessError::Exited(name, 1)));
            }
            Ok(())
        }
    }

    fn session() -> Session {
        Session::with_home(PathBuf::from("/home/u"), PathBuf::from("/home/u"))
    }

    fn parse(input: &str) -> (Session, Recorder) {
        let mut session = session();
        let mut recorder = Recorder::default();
        let _ = Parser::new().parse_line(input, &mut session, &mut recorder);
        (session, recorder)
    }

    #[test]
    fn test_blank_lines() {
        for input in ["", "   ", " \n"] {
            let (session, recorder) = parse(input);
            assert_eq!(session.status(), SessionStatus::Blank, "input {:?}", input);
            assert!(recorder.calls.is_empty());
        }
    }

    #[test]
    fn test_simple_words() {
        let (session, recorder) = parse("echo  hello   world");
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, ["echo", "hello", "world"]);
        assert_eq!(session.status(), SessionStatus::Okay);
    }

    #[test]
    fn test_quoted_argument() {
        let (_, recorder) = parse("echo \"a b\" c");
        assert_eq!(recorder.calls[0].0, ["echo", "a b", "c"]);
    }

    #[test]
    fn test_quote_kinds_do_not_close_each_other() {
        let (_, recorder) = parse("echo \"a 'b' c\"");
        assert_eq!(recorder.calls[0].0, ["echo", "a 'b' c"]);
    }

    #[test]
    fn test_escaped_space() {
        let (_, recorder) = parse("echo a\\ b");
        assert_eq!(recorder.calls[0].0, ["echo", "a b"]);
    }

    #[test]
    fn test_escaped_metacharacters() {
        let (_, recorder) = parse("echo \\; \\> \\~");
        assert_eq!(recorder.calls[0].0, ["echo", ";", ">", "~"]);
    }

    #[test]
    fn test_semicolon_sequencing() {
        let (session, recorder) = parse("first one; second two");
        assert_eq!(recorder.calls.len(), 2);
        assert_eq!(recorder.calls[0].0, ["first", "one"]);
        assert_eq!(recorder.calls[1].0, ["second", "two"]);
        // The `;` marked the first sub-command complete; the trailing
        // command leaves that standing.
        assert_eq!(session.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_trailing_semicolon_finishes() {
        let (session, recorder) = parse("only;");
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(session.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_failed_subcommand_aborts_line() {
        let mut session = session();
        let mut recorder = Recorder {
            fail_on: Some("bad".to_string()),
            ..Recorder::default()
        };
        let result = Parser::new().parse_line("bad; good", &mut session, &mut recorder);
        assert!(result.is_err());
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(session.status(), SessionStatus::Error);
    }

    #[test]
    fn test_exit_stops_the_scan() {
        let (session, recorder) = parse("exit; echo after");
        assert_eq!(recorder.calls.len(), 1);
        assert!(!session.keep_alive());
    }

    #[test]
    fn test_output_redirect() {
        let (session, recorder) = parse("echo hi > /tmp/out");
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, ["echo", "hi"]);
        assert_eq!(
            recorder.calls[0].1,
            Some(Redirect {
                path: PathBuf::from("/tmp/out"),
                kind: RedirectKind::Truncate,
            })
        );
        assert_eq!(session.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_append_redirect() {
        let (_, recorder) = parse("echo hi >> log.txt");
        assert_eq!(
            recorder.calls[0].1,
            Some(Redirect {
                path: PathBuf::from("log.txt"),
                kind: RedirectKind::Append,
            })
        );
    }

    #[test]
    fn test_input_redirect() {
        let (_, recorder) = parse("wc -l < notes");
        assert_eq!(recorder.calls[0].0, ["wc", "-l"]);
        assert_eq!(
            recorder.calls[0].1,
            Some(Redirect {
                path: PathBuf::from("notes"),
                kind: RedirectKind::Input,
            })
        );
    }

    #[test]
    fn test_redirect_without_spaces() {
        let (_, recorder) = parse("echo hi>out");
        assert_eq!(recorder.calls[0].0, ["echo", "hi"]);
        assert_eq!(recorder.calls[0].1.as_ref().map(|r| r.path.clone()),
            Some(PathBuf::from("out")));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let (_, recorder) = parse("cd ~/proj");
        assert_eq!(recorder.calls[0].0, ["cd", "/home/u/proj"]);

        let (_, recorder) = parse("cd ~");
        assert_eq!(recorder.calls[0].0, ["cd", "/home/u"]);
    }

    #[test]
    fn test_tilde_unknown_user_errors() {
        let (session, recorder) = parse("~nouserlikethis");
        assert_eq!(session.status(), SessionStatus::Error);
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_tilde_inside_quotes_is_literal() {
        let (_, recorder) = parse("echo \"~\"");
        assert_eq!(recorder.calls[0].0, ["echo", "~"]);
    }

    #[test]
    fn test_semicolon_inside_quotes_is_literal() {
        let (_, recorder) = parse("echo \"a;b\"");
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].0, ["echo", "a;b"]);
    }
}
