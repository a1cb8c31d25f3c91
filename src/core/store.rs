//! Table persistence
//!
//! Tables are standalone JSON files produced and consumed by the host
//! device-tree tool. Paths are explicit caller choices; no directory scheme is
//! imposed. Saves are atomic (temp file then rename) and carry a `.sha256`
//! sidecar so hand-offs between tools can be integrity-checked.

use crate::core::error::{Error, Result};
use crate::core::table::{FirewallTable, MAX_ENTRIES};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sidecar path: the table filename with `.sha256` appended.
fn checksum_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(".sha256");
    path.with_file_name(name)
}

fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Loads a table from a JSON file.
///
/// A `.sha256` sidecar, when present, is verified first; a mismatch warns but
/// does not fail the load (hand-edited tables are legal). The
/// [`MAX_ENTRIES`] cap is enforced after parsing.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, is not valid table JSON, or
/// exceeds the entry cap.
pub fn load_table(path: &Path) -> Result<FirewallTable> {
    let json = std::fs::read_to_string(path)?;

    if let Ok(expected) = std::fs::read_to_string(checksum_path(path)) {
        let actual = sha256_hex(&json);
        if expected.trim() != actual {
            tracing::warn!(
                "table '{}' checksum mismatch (expected: {}, got: {})",
                path.display(),
                expected.trim(),
                actual
            );
        }
    }

    let table: FirewallTable = serde_json::from_str(&json)?;

    if table.entries.len() > MAX_ENTRIES {
        return Err(Error::TooManyEntries {
            got: table.entries.len(),
            max: MAX_ENTRIES,
        });
    }

    Ok(table)
}

/// Saves a table atomically.
///
/// Writes to a temporary file in the destination directory, syncs, then
/// renames over the target so a crash or full disk cannot leave a truncated
/// table behind. A checksum sidecar is written afterwards.
///
/// # Errors
///
/// Returns `Err` on serialization or file I/O failure.
pub fn save_table(path: &Path, table: &FirewallTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    std::fs::write(checksum_path(path), sha256_hex(&json))?;

    tracing::debug!(
        "saved table '{}' ({} entries)",
        path.display(),
        table.entries.len()
    );
    Ok(())
}
