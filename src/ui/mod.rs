//! Host-facing collaborators: the directory listing / notification surface
//! and the player that receives resolved stream sources.

use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One selectable row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub title: String,
    pub playable: bool,
    /// Plugin URL invoked when the entry is selected.
    pub target: String,
}

pub trait Presenter {
    fn add_entry(&mut self, entry: &ListEntry);
    fn end_of_listing(&mut self);
    fn notify(&mut self, title: &str, message: &str, severity: Severity);
    /// Ask the host to re-render the current listing.
    fn refresh(&mut self);
}

pub trait Player {
    fn resolve(&mut self, source: &str, succeeded: bool);
}

/// Line-oriented host adapter: each call becomes one tab-separated line.
///
/// Backslash, tab, carriage return and newline inside a field are written
/// as `\\`, `\t`, `\r` and `\n`.
///
/// ```text
/// entry   <handle>  <label>  <title>  <playable>  <target>
/// end     <handle>
/// notify  <handle>  <severity>  <title>  <message>
/// refresh <handle>
/// resolve <handle>  <succeeded>  <source>
/// ```
pub struct ConsoleHost<W: Write> {
    handle: i32,
    out: W,
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(handle: i32, out: W) -> Self {
        Self { handle, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, fields: &[&str]) {
        let line = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join("\t");
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            log::error!("Failed to write to host: {}", e);
        }
    }
}

fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

impl<W: Write> Presenter for ConsoleHost<W> {
    fn add_entry(&mut self, entry: &ListEntry) {
        let handle = self.handle.to_string();
        let playable = entry.playable.to_string();
        self.emit(&[
            "entry",
            &handle,
            &entry.label,
            &entry.title,
            &playable,
            &entry.target,
        ]);
    }

    fn end_of_listing(&mut self) {
        let handle = self.handle.to_string();
        self.emit(&["end", &handle]);
    }

    fn notify(&mut self, title: &str, message: &str, severity: Severity) {
        let handle = self.handle.to_string();
        let severity = severity.to_string();
        self.emit(&["notify", &handle, &severity, title, message]);
    }

    fn refresh(&mut self) {
        let handle = self.handle.to_string();
        self.emit(&["refresh", &handle]);
    }
}

impl<W: Write> Player for ConsoleHost<W> {
    fn resolve(&mut self, source: &str, succeeded: bool) {
        let handle = self.handle.to_string();
        let succeeded = succeeded.to_string();
        self.emit(&["resolve", &handle, &succeeded, source]);
    }
}
