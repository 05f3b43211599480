mod prompt;

use crate::core::commands::CommandExecutor;
use crate::core::session::Session;
use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::Highlighter;
use crate::input::{History, LineReader, ReadOutcome};
use crate::parser::Parser;
use crate::process::signal;

const HISTORY_FILE: &str = ".venule_history";
const HISTORY_MAX_ENTRIES: usize = 1000;

pub struct Shell {
    reader: LineReader,
    session: Session,
    parser: Parser,
    executor: CommandExecutor,
    history: History,
    highlighter: Highlighter,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let reader = LineReader::new()?;
        let session = Session::new()?;

        // One relay for the life of the session.
        signal::install_relay(session.active_command().clone())?;

        let history_file = session.home().join(HISTORY_FILE);
        let history = History::new(history_file, HISTORY_MAX_ENTRIES)?;

        Ok(Shell {
            reader,
            session,
            parser: Parser::new(),
            executor: CommandExecutor::new(),
            history,
            highlighter: Highlighter::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.session.keep_alive() {
            let prompt = prompt::render(&self.session);
            match self.reader.read(&prompt)? {
                ReadOutcome::Interrupted => {
                    // Cancelled read, not input: fresh line, fresh prompt.
                    println!();
                    continue;
                }
                ReadOutcome::Eof => {
                    if !self.flags.is_set("quiet") {
                        println!("{}", self.highlighter.hint("[Reached EOF]"));
                    }
                    break;
                }
                ReadOutcome::Line(line) => self.interpret(&line),
            }
        }
        Ok(())
    }

    fn interpret(&mut self, line: &str) {
        if let Err(e) = self
            .parser
            .parse_line(line, &mut self.session, &mut self.executor)
        {
            if !self.flags.is_set("quiet") {
                eprintln!("{}", self.highlighter.error(&e.to_string()));
            }
        }

        // Lines that ended in an error are not recorded.
        if self.session.records_history() {
            if let Err(e) = self.history.add(line) {
                if !self.flags.is_set("quiet") {
                    eprintln!("Warning: Couldn't add to history: {}", e);
                }
            }
        }
    }
}
