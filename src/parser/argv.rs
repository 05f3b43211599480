/// A finalized argument vector: command name first, then its arguments.
///
/// `std::process::Command` supplies the trailing NULL that exec expects,
/// so freezing the builder is the whole of the sentinel step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv {
    args: Vec<String>,
}

impl Argv {
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    pub fn args(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

/// Accumulates argument strings for one sub-command.
///
/// `finalize` consumes the builder, so a frozen vector can never grow
/// again and finalizing twice without a fresh builder does not compile.
#[derive(Debug, Default)]
pub struct ArgvBuilder {
    args: Vec<String>,
}

impl ArgvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one owned copy of the committed token.
    pub fn append(&mut self, token: &str) {
        self.args.push(token.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn finalize(self) -> Argv {
        Argv { args: self.args }
    }
}
