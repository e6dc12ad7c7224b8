//! The interactive command loop.

use std::io::{self, Write};

use fieldmend_engine::Targets;
use fieldmend_foundation::{
    Error, ErrorKind, FieldPath, ModificationInstruction, RecordId, Result,
};
use fieldmend_history::parse_timestamp;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (dataset, history, backups).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "fieldmend> ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    println!();
                    continue;
                }
                ReadResult::Eof => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(trimmed);

            match self.execute(trimmed) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one command line.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    ///
    /// # Errors
    ///
    /// Returns an error when the command is malformed or the underlying
    /// operation fails.
    pub fn execute(&mut self, line: &str) -> Result<bool> {
        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "load" => self.cmd_load(args)?,
            "history" => self.cmd_history(args)?,
            "audit" => self.cmd_audit(args)?,
            "remove" => self.cmd_remove(args)?,
            "swap" => self.cmd_swap(args)?,
            "add" => self.cmd_add(args)?,
            "restore" => self.cmd_restore(args)?,
            "undo" => self.cmd_undo(),
            "save" => self.cmd_save(args)?,
            "backup" => self.cmd_backup(args)?,
            "help" => self.print_help(),
            "quit" | "exit" => return Ok(false),
            other => {
                return Err(Error::new(ErrorKind::Internal(format!(
                    "unknown command '{other}', try 'help'"
                ))));
            }
        }

        Ok(true)
    }

    fn cmd_load(&mut self, args: &str) -> Result<()> {
        let mut parts = args.split_whitespace();
        let Some(data) = parts.next() else {
            return Err(usage("load DATA.csv [HISTORY.csv]"));
        };

        let rows = self.session.load_dataset(data)?;
        println!("Loaded {rows} records from {data}");

        if let Some(history) = parts.next() {
            let events = self.session.load_events(history)?;
            println!("Loaded {events} history events from {history}");
        }
        Ok(())
    }

    fn cmd_history(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            return Err(usage("history RECORD_ID"));
        }

        let record = RecordId::from(args);
        let points = self.session.restore_points(&record);
        if points.is_empty() {
            println!("No history for {}", record.as_str());
            return Ok(());
        }

        for point in points {
            println!(
                "{}  ({})",
                point.at.format("%d/%m/%Y %H:%M"),
                point.fields.join(", ")
            );
        }
        Ok(())
    }

    fn cmd_audit(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            return Err(usage("audit FIELD_PATH"));
        }

        let results = self.session.audit(args)?;
        if results.is_empty() {
            println!("No references to {args}");
            return Ok(());
        }

        for row in &results {
            for hit in &row.hits {
                let columns: Vec<&str> = hit.columns.iter().map(|c| c.name()).collect();
                println!(
                    "{}  {}  [{}]{}",
                    row.record.as_str(),
                    hit.path,
                    columns.join(", "),
                    if hit.in_filters { " (filters)" } else { "" }
                );
            }
        }
        println!("{} record(s) affected", results.len());
        Ok(())
    }

    fn cmd_remove(&mut self, args: &str) -> Result<()> {
        let mut parts = args.split_whitespace();
        let Some(field) = parts.next() else {
            return Err(usage("remove FIELD_PATH [RECORD_ID...]"));
        };

        let path = FieldPath::parse(field)?;
        let targets = parse_targets(parts);
        self.run_batch(&[ModificationInstruction::Remove(path)], &targets);
        Ok(())
    }

    fn cmd_swap(&mut self, args: &str) -> Result<()> {
        let mut parts = args.split_whitespace();
        let (Some(old), Some(new)) = (parts.next(), parts.next()) else {
            return Err(usage("swap OLD_PATH NEW_PATH [RECORD_ID...]"));
        };

        let old = FieldPath::parse(old)?;
        let new = FieldPath::parse(new)?;
        let targets = parse_targets(parts);
        self.run_batch(&[ModificationInstruction::Swap { old, new }], &targets);
        Ok(())
    }

    fn cmd_add(&mut self, args: &str) -> Result<()> {
        let mut parts = args.split_whitespace();
        let Some(field) = parts.next() else {
            return Err(usage("add FIELD_PATH [RECORD_ID...]"));
        };

        let path = FieldPath::parse(field)?;
        let targets = parse_targets(parts);
        self.run_batch(&[ModificationInstruction::Add(path)], &targets);
        Ok(())
    }

    fn run_batch(&mut self, instructions: &[ModificationInstruction], targets: &Targets) {
        let outcome = self.session.modify(instructions, targets);

        for (id, summary) in &outcome.applied {
            println!("{}: {summary}", id.as_str());
        }
        for (id, error) in &outcome.failed {
            println!("\x1b[31m{}: {error}\x1b[0m", id.as_str());
        }
        println!(
            "{} changed, {} failed",
            outcome.applied.len(),
            outcome.failed.len()
        );
    }

    fn cmd_restore(&mut self, args: &str) -> Result<()> {
        // The timestamp itself contains a space, so split only once.
        let Some((record, timestamp)) = args.split_once(char::is_whitespace) else {
            return Err(usage("restore RECORD_ID DD/MM/YYYY HH:MM"));
        };

        let record = RecordId::from(record);
        let cutoff = parse_timestamp(timestamp)?;
        let result = self.session.restore(&record, cutoff)?;

        for entry in &result.entries {
            println!(
                "{}  {}  {}",
                entry.at.format("%d/%m/%Y %H:%M"),
                entry.field,
                entry.status
            );
        }
        for failure in &result.failures {
            println!("\x1b[31m{}: {}\x1b[0m", failure.field, failure.reason);
        }
        for warning in &result.warnings {
            println!("\x1b[33mWarning: {warning}\x1b[0m");
        }
        println!("Restored {} to {}", record.as_str(), cutoff.format("%d/%m/%Y %H:%M"));
        Ok(())
    }

    fn cmd_undo(&mut self) {
        if self.session.undo() {
            println!("Reverted last change");
        } else {
            println!("Nothing to undo");
        }
    }

    fn cmd_save(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            return Err(usage("save FILE.csv"));
        }
        self.session.save_csv(args)?;
        println!("Saved {} records to {args}", self.session.dataset().len());
        Ok(())
    }

    fn cmd_backup(&mut self, args: &str) -> Result<()> {
        if args.is_empty() {
            return Err(usage("backup FILE"));
        }
        self.session.write_backup(args)?;
        println!("Wrote backup to {args}");
        Ok(())
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    #[allow(clippy::unused_self)]
    fn print_help(&self) {
        println!("Commands:");
        println!("  load DATA.csv [HISTORY.csv]        Load a tracker export and optional field history");
        println!("  history RECORD_ID                  List restore points for a record");
        println!("  audit FIELD_PATH                   Find records referencing a field");
        println!("  remove FIELD_PATH [RECORD_ID...]   Remove a field reference everywhere");
        println!("  swap OLD_PATH NEW_PATH [ID...]     Replace one field reference with another");
        println!("  add FIELD_PATH [RECORD_ID...]      Add a field to the tracked field list");
        println!("  restore RECORD_ID DD/MM/YYYY HH:MM Roll a record back to a point in time");
        println!("  undo                               Revert the last change");
        println!("  save FILE.csv                      Write the dataset as CSV");
        println!("  backup FILE                        Write a binary snapshot");
        println!("  quit                               Exit");
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mfieldmend\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type 'help' for commands. Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn usage(text: &str) -> Error {
    Error::new(ErrorKind::Internal(format!("usage: {text}")))
}

fn parse_targets<'a>(ids: impl Iterator<Item = &'a str>) -> Targets {
    let ids: Vec<RecordId> = ids.map(RecordId::from).collect();
    if ids.is_empty() {
        Targets::All
    } else {
        Targets::Ids(ids)
    }
}
