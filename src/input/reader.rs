use crate::error::ShellError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What one prompt interaction produced.
///
/// `Interrupted` means the read was cancelled and is not input; `Eof`
/// means the input stream is gone and the session should end.
#[derive(Debug)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Blocking interactive line acquisition with a tagged outcome, so the
/// caller's loop is plain conditional dispatch instead of signal
/// handling.
pub struct LineReader {
    editor: DefaultEditor,
}

impl LineReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    pub fn read(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }
}
