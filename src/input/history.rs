use std::{
    borrow::Cow,
    collections::BTreeSet,
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};

use crate::error::ShellError;

mod file_ops {
    use super::*;

    pub fn load_entries(file_path: &PathBuf) -> Result<BTreeSet<Cow<'static, str>>, ShellError> {
        let mut entries = BTreeSet::new();

        if file_path.exists() {
            let file = File::open(file_path)?;
            let reader = BufReader::new(file);

            for line in reader.lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    entries.insert(Cow::Owned(line));
                }
            }
        }

        Ok(entries)
    }

    pub fn append_entry(file_path: &PathBuf, entry: &str) -> Result<(), ShellError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(file_path)?;

        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// Persistent record of lines that did not end in an error. The caller
/// gates recording on the session status; blank entries are dropped
/// here.
pub struct History {
    entries: BTreeSet<Cow<'static, str>>,
    file_path: PathBuf,
    max_entries: usize,
}

impl History {
    pub fn new(history_file: PathBuf, max_entries: usize) -> Result<Self, ShellError> {
        let entries = file_ops::load_entries(&history_file)?;

        Ok(History {
            entries,
            file_path: history_file,
            max_entries,
        })
    }

    pub fn add(&mut self, entry: &str) -> Result<(), ShellError> {
        if entry.trim().is_empty() {
            return Ok(());
        }

        self.entries.insert(Cow::Owned(entry.to_owned()));

        while self.entries.len() > self.max_entries {
            if let Some(first) = self.entries.iter().next().cloned() {
                self.entries.remove(&first);
            }
        }

        file_ops::append_entry(&self.file_path, entry)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
