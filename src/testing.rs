//! Test doubles shared by the unit tests.

use std::cell::Cell;

use crate::dom::LinkList;
use crate::net::fetch::{LinkSource, NetworkError};
use crate::ui::{ListEntry, Player, Presenter, Severity};

pub fn links(items: &[&str]) -> LinkList {
    items.iter().map(|s| s.to_string()).collect()
}

/// Canned link source that counts calls.
pub struct FakeSource {
    result: Option<LinkList>,
    calls: Cell<usize>,
}

impl FakeSource {
    pub fn ok(items: &[&str]) -> Self {
        Self {
            result: Some(links(items)),
            calls: Cell::new(0),
        }
    }

    /// Fails every fetch with an unparsable-URL network error.
    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl LinkSource for FakeSource {
    fn fetch(&self, url: &str) -> Result<LinkList, NetworkError> {
        self.calls.set(self.calls.get() + 1);
        match &self.result {
            Some(links) => Ok(links.clone()),
            None => Err(NetworkError::InvalidUrl {
                url: url.to_string(),
                source: url::ParseError::EmptyHost,
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub entries: Vec<ListEntry>,
    pub ended: usize,
    pub notifications: Vec<(String, String, Severity)>,
    pub refreshes: usize,
    pub resolved: Vec<(String, bool)>,
}

impl Presenter for RecordingHost {
    fn add_entry(&mut self, entry: &ListEntry) {
        self.entries.push(entry.clone());
    }

    fn end_of_listing(&mut self) {
        self.ended += 1;
    }

    fn notify(&mut self, title: &str, message: &str, severity: Severity) {
        self.notifications
            .push((title.to_string(), message.to_string(), severity));
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

impl Player for RecordingHost {
    fn resolve(&mut self, source: &str, succeeded: bool) {
        self.resolved.push((source.to_string(), succeeded));
    }
}
