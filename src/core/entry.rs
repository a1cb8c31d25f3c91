//! Firewall table row data structures and line rendering
//!
//! This module defines the value types describing one hardware firewall
//! permission rule: the memory region it protects and the bus masters allowed
//! to touch it.
//!
//! # Row Structure
//!
//! A [`FirewallTableEntry`] holds:
//! - Owning subsystem id
//! - Protected region (base address plus [`RegionSize`])
//! - Read/write and trust-zone flags (opaque encodings owned by the firewall
//!   programmer)
//! - An ordered list of [`MidEntry`] master-ID/mask pairs
//! - Module and power-management tags, and a rule priority
//!
//! # Renderings
//!
//! Downstream tooling parses and diffs the rendered lines, so field order,
//! separators and pad widths are load-bearing. The `Display` impl produces the
//! fixed-width form; [`FirewallTableEntry::write_entry`] streams the
//! tab-separated form to a caller-supplied sink.
//!
//! # Example
//!
//! ```
//! use fwtable::{FirewallTableEntry, MidEntry, RegionSize};
//!
//! let entry = FirewallTableEntry::new(
//!     0x3,
//!     0xf900_0000,
//!     RegionSize::Bounded(0x1000),
//!     1,
//!     0,
//!     vec![MidEntry::new(0x3, 0xff)],
//!     "serial0",
//! )
//! .with_pm_tag("pm1")
//! .with_priority(5);
//!
//! assert!(entry.to_string().ends_with("0x3/0xff"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// Priority assigned when the generating logic does not specify one.
///
/// Lower/higher precedence is a convention of the consuming
/// firewall-programming logic, not of this type.
pub const DEFAULT_PRIORITY: u32 = 10;

/// One master-ID/mask pair naming a bus master a rule applies to.
///
/// Only `(incoming_id & mask) == (smid & mask)` participates in the hardware
/// comparison; the optional `name` is a display label from the platform device
/// tables and never appears in the line renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidEntry {
    /// Master/security ID of the bus master
    pub smid: u32,
    /// Bitmask selecting the significant ID bits
    pub mask: u32,
    /// Display label, stored but not rendered
    #[serde(default)]
    pub name: String,
}

impl MidEntry {
    pub fn new(smid: u32, mask: u32) -> Self {
        Self {
            smid,
            mask,
            name: String::new(),
        }
    }

    pub fn named(smid: u32, mask: u32, name: impl Into<String>) -> Self {
        Self {
            smid,
            mask,
            name: name.into(),
        }
    }
}

impl fmt::Display for MidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}/{:#x}", self.smid, self.mask)
    }
}

/// Size of a protected region: a byte count, or the wildcard meaning
/// "extends to the end of addressable space".
///
/// The wildcard renders as the literal `*` and is never hex-converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSize {
    Bounded(u64),
    Unbounded,
}

impl RegionSize {
    pub const fn bytes(self) -> Option<u64> {
        match self {
            RegionSize::Bounded(bytes) => Some(bytes),
            RegionSize::Unbounded => None,
        }
    }

    pub const fn is_unbounded(self) -> bool {
        matches!(self, RegionSize::Unbounded)
    }
}

impl fmt::Display for RegionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f.pad keeps column widths working for both variants
        match self {
            RegionSize::Bounded(bytes) => f.pad(&format!("{bytes:#x}")),
            RegionSize::Unbounded => f.pad("*"),
        }
    }
}

impl Serialize for RegionSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RegionSize::Bounded(bytes) => serializer.serialize_u64(*bytes),
            RegionSize::Unbounded => serializer.serialize_str("*"),
        }
    }
}

impl<'de> Deserialize<'de> for RegionSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Host tables carry sizes as numbers, hex strings, or the "*" sentinel
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bytes(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bytes(bytes) => Ok(RegionSize::Bounded(bytes)),
            Raw::Text(text) if text == "*" => Ok(RegionSize::Unbounded),
            Raw::Text(text) => crate::utils::parse_hex(&text)
                .map(RegionSize::Bounded)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// One firewall rule: a protected region, its access requirements, and the
/// masters the rule applies to.
///
/// A pure data holder. No field is validated at construction; advisory checks
/// live in [`crate::validators`] and run at the host tool's discretion.
/// `mid_list` order is display-significant and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallTableEntry {
    /// Id of the owning subsystem
    pub subsystem_id: u32,
    /// Base address of the protected region
    pub base_addr: u64,
    /// Region size in bytes, or the wildcard
    pub size: RegionSize,
    /// Read/write permission encoding (opaque to this crate)
    pub rw: u32,
    /// Trust-zone requirement encoding (opaque to this crate)
    pub tz: u32,
    /// Masters the rule applies to, in display order
    pub mid_list: Vec<MidEntry>,
    /// Owning hardware module label; stored but not rendered
    pub module_tag: String,
    /// Power-management tag
    #[serde(default)]
    pub pm_tag: String,
    /// Rule priority; precedence convention belongs to the consumer
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

impl FirewallTableEntry {
    /// Creates an entry with the default priority and an empty pm tag.
    ///
    /// Field order mirrors the host tool's construction order. Use
    /// [`with_pm_tag`](Self::with_pm_tag) and
    /// [`with_priority`](Self::with_priority) for the defaulted fields.
    pub fn new(
        subsystem_id: u32,
        base_addr: u64,
        size: RegionSize,
        rw: u32,
        tz: u32,
        mid_list: Vec<MidEntry>,
        module_tag: impl Into<String>,
    ) -> Self {
        Self {
            subsystem_id,
            base_addr,
            size,
            rw,
            tz,
            mid_list,
            module_tag: module_tag.into(),
            pm_tag: String::new(),
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_pm_tag(mut self, pm_tag: impl Into<String>) -> Self {
        self.pm_tag = pm_tag.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Writes the tab-separated rendering of this entry to `w`.
    ///
    /// Six tab-terminated fields (subsystem id, base address, size, rw, tz,
    /// priority) followed by the space-joined MID list and a newline. Numeric
    /// fields right-align within their pad widths; hex fields left-align.
    ///
    /// # Errors
    ///
    /// Propagates any `io::Error` from the sink unchanged.
    pub fn write_entry<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(
            w,
            "{:<#10x}\t{:<#10x}\t{:<8}\t{:1}\t{:1}\t{:2}\t",
            self.subsystem_id, self.base_addr, self.size, self.rw, self.tz, self.priority
        )?;
        for (i, mid) in self.mid_list.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write!(w, "{mid}")?;
        }
        writeln!(w)
    }

    /// Convenience wrapper for [`write_entry`](Self::write_entry) on process
    /// stdout.
    ///
    /// # Errors
    ///
    /// Propagates any `io::Error` from stdout unchanged.
    pub fn print_entry(&self) -> io::Result<()> {
        self.write_entry(&mut io::stdout().lock())
    }
}

impl fmt::Display for FirewallTableEntry {
    /// Fixed-width single-line rendering, space separated.
    ///
    /// Hex fields left-align inside their pad widths (base address 10, size 8,
    /// pm tag 15); `rw`, `tz` and `priority` carry no width here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x} {:<#10x} {:<8} {} {} {} {:<15}",
            self.subsystem_id,
            self.base_addr,
            self.size,
            self.rw,
            self.tz,
            self.priority,
            self.pm_tag
        )?;
        for mid in &self.mid_list {
            write!(f, " {mid}")?;
        }
        Ok(())
    }
}
