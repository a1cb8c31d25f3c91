//! Firewall table container
//!
//! An ordered, non-deduplicated sequence of [`FirewallTableEntry`] rows as
//! built by the host tool, with helpers for rendering the whole table in
//! either line format.

use crate::core::entry::FirewallTableEntry;
use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io;

/// Maximum number of entries allowed in a single table
///
/// Limit prevents memory exhaustion from malformed table files. Real platform
/// tables stay well under this (a few hundred rows on the largest designs).
pub const MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallTable {
    pub entries: Vec<FirewallTableEntry>,
}

impl FirewallTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyEntries`] once the table holds [`MAX_ENTRIES`]
    /// rows.
    pub fn push(&mut self, entry: FirewallTableEntry) -> Result<()> {
        if self.entries.len() >= MAX_ENTRIES {
            return Err(Error::TooManyEntries {
                got: self.entries.len() + 1,
                max: MAX_ENTRIES,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows owned by one subsystem, in table order.
    pub fn entries_for_subsystem(
        &self,
        subsystem_id: u32,
    ) -> impl Iterator<Item = &FirewallTableEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.subsystem_id == subsystem_id)
    }

    /// Renders the fixed-width representation, one newline-terminated line per
    /// entry.
    pub fn render(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{entry}");
        }
        out
    }

    /// Streams the tab-separated rendering of every entry to `w`.
    ///
    /// # Errors
    ///
    /// Propagates any `io::Error` from the sink unchanged.
    pub fn write_tsv<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            entry.write_entry(w)?;
        }
        Ok(())
    }
}
