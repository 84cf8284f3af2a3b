use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Records one entry per placement the solver makes. Entries can go to the
/// console, to an append-only trace file, or nowhere; the entry count is
/// kept either way so callers can report how many deductions a solve took.
pub struct SolveLog {
    file: Option<File>,
    console: bool,
    color: bool,
    entries: usize,
}

impl SolveLog {
    /// Count entries but emit nothing.
    pub fn quiet() -> Self {
        Self { file: None, console: false, color: false, entries: 0 }
    }

    pub fn console(color: bool) -> Self {
        Self { file: None, console: true, color, entries: 0 }
    }

    /// Append entries to `path`, optionally echoing to the console.
    pub fn to_file(path: impl AsRef<Path>, console: bool, color: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .with_context(|| format!("opening trace file {}", path.as_ref().display()))?;
        Ok(Self { file: Some(file), console, color, entries: 0 })
    }

    pub fn note(&mut self, rule: &str, detail: &str) -> Result<()> {
        self.entries += 1;
        if let Some(f) = self.file.as_mut() {
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            writeln!(f, "[{ts}] {rule}: {detail}")?;
        }
        if self.console {
            if self.color {
                println!("{} {}", rule.blue().bold(), detail);
            } else {
                println!("{rule}: {detail}");
            }
        }
        Ok(())
    }

    /// Number of entries recorded so far.
    pub fn entries(&self) -> usize {
        self.entries
    }
}
