//! Interactive entry editing session.
//!
//! A line-oriented stand-in for the original form-based editor: each
//! input line adds one entry, `:del N` removes one, and the summary is
//! recomputed in full and reprinted after every change.

use crate::calc::aggregate;
use crate::input::parse_entry_line;
use crate::models::{EntryRow, EntryTable, SummaryReport};
use crate::report::{generate_text_report, FormatOptions};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// A command entered at the session prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add one entry row.
    Add(EntryRow),
    /// Remove the entry with this 1-based index.
    Remove(usize),
    /// Print the current entries with their indices.
    List,
    /// Print the command help.
    Help,
    /// End the session.
    Done,
}

/// Parse one prompt line into a command.
///
/// Lines starting with `:` are commands; an empty line ends the session;
/// anything else is parsed as a delimited entry row.
pub fn parse_command(line: &str, delimiter: u8) -> Result<Command, String> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Ok(Command::Done);
    }

    if let Some(command) = trimmed.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        return match parts.next() {
            Some("done") | Some("quit") => Ok(Command::Done),
            Some("list") => Ok(Command::List),
            Some("help") => Ok(Command::Help),
            Some("del") => {
                let index = parts
                    .next()
                    .ok_or_else(|| ":del needs an entry number".to_string())?;
                let index: usize = index
                    .parse()
                    .map_err(|_| format!("invalid entry number: '{}'", index))?;
                Ok(Command::Remove(index))
            }
            _ => Err(format!("unknown command ':{}' (try :help)", command)),
        };
    }

    let entry = parse_entry_line(trimmed, delimiter).map_err(|e| e.to_string())?;
    Ok(Command::Add(entry))
}

/// An interactive editing session over an entry table.
pub struct Session {
    entries: EntryTable,
    delimiter: u8,
}

impl Session {
    /// Create a session, optionally seeded with existing entries.
    pub fn new(entries: EntryTable, delimiter: u8) -> Self {
        Self { entries, delimiter }
    }

    /// The current entries.
    pub fn entries(&self) -> &[EntryRow] {
        &self.entries
    }

    fn add(&mut self, entry: EntryRow) {
        debug!("Adding entry: {:?}", entry);
        self.entries.push(entry);
    }

    /// Remove the entry with the given 1-based index.
    fn remove(&mut self, index: usize) -> Result<EntryRow, String> {
        if index == 0 || index > self.entries.len() {
            return Err(format!(
                "no entry {} (have {})",
                index,
                self.entries.len()
            ));
        }
        Ok(self.entries.remove(index - 1))
    }

    fn render_summary(&self, options: &FormatOptions) -> String {
        // The session prints only the summary; entries are listed on demand.
        let compact = FormatOptions {
            include_entries: false,
            ..options.clone()
        };
        let report = SummaryReport::new("session", self.entries.clone(), aggregate(&self.entries));
        generate_text_report(&report, &compact)
    }

    fn render_entries(&self, options: &FormatOptions) -> String {
        if self.entries.is_empty() {
            return "No entries.\n".to_string();
        }

        let mut listing = String::new();
        for (index, entry) in self.entries.iter().enumerate() {
            listing.push_str(&format!(
                "{:>3}  {}  {:.*} @ {:.*}\n",
                index + 1,
                entry.description,
                options.quantity_precision,
                entry.quantity,
                options.price_precision,
                entry.cost,
            ));
        }
        listing
    }

    /// Run the session on stdin, returning the final entry table.
    pub fn run(mut self, options: &FormatOptions) -> Result<EntryTable> {
        println!("Enter entries as: description{}quantity{}price", self.delimiter as char, self.delimiter as char);
        println!("Commands: :del N, :list, :help. Empty line or :done finishes.\n");

        if !self.entries.is_empty() {
            println!("{}", self.render_summary(options));
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            io::stdout().flush().context("Failed to flush stdout")?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read from stdin")?,
                None => break, // EOF ends the session like :done
            };

            match parse_command(&line, self.delimiter) {
                Ok(Command::Add(entry)) => {
                    self.add(entry);
                    println!("\n{}", self.render_summary(options));
                }
                Ok(Command::Remove(index)) => match self.remove(index) {
                    Ok(removed) => {
                        println!("Removed entry {}: {}", index, removed.description);
                        println!("\n{}", self.render_summary(options));
                    }
                    Err(message) => println!("{}", message),
                },
                Ok(Command::List) => print!("{}", self.render_entries(options)),
                Ok(Command::Help) => {
                    println!("  description{}quantity{}price  add an entry", self.delimiter as char, self.delimiter as char);
                    println!("  :del N                       remove entry N (see :list)");
                    println!("  :list                        show entries with indices");
                    println!("  :done                        finish (empty line works too)");
                }
                Ok(Command::Done) => break,
                Err(message) => println!("{}", message),
            }
        }

        Ok(self.entries)
    }
}
