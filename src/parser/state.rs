use super::ParseError;

/// Lexical mode of the scanner at the current position.
///
/// `InQuotes` remembers which delimiter opened the mode; only the same
/// kind closes it again. A third mode for backtick command substitution
/// is reserved but never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Normal,
    InQuotes(char),
}

/// Maximum nesting depth before `push` refuses. Quote toggling alone
/// never nests past one level, so the bound only trips on misuse.
const MAX_DEPTH: usize = 16;

/// Stack of nested lexical modes, innermost on top.
#[derive(Debug, Default)]
pub struct StateStack {
    modes: Vec<ParseMode>,
}

impl StateStack {
    pub fn new() -> Self {
        Self { modes: Vec::new() }
    }

    /// Cleared at the start of every input line.
    pub fn clear(&mut self) {
        self.modes.clear();
    }

    pub fn push(&mut self, mode: ParseMode) -> Result<(), ParseError> {
        if self.modes.len() >= MAX_DEPTH {
            return Err(ParseError::StateOverflow);
        }
        self.modes.push(mode);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<ParseMode, ParseError> {
        self.modes.pop().ok_or(ParseError::StateUnderflow)
    }

    /// The innermost mode, or `Normal` when the stack is empty.
    pub fn current(&self) -> ParseMode {
        self.modes.last().copied().unwrap_or(ParseMode::Normal)
    }
}
