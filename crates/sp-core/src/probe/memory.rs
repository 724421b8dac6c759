//! Memory statistics from the kernel meminfo pseudo-file.
//!
//! Format is `<Label>: <value> [<unit>]` per line, one entry per line,
//! order-insensitive, with inconsistent internal whitespace. All values
//! are expected in kilobytes; an entry declaring any other unit fails the
//! whole parse rather than being silently converted.
//!
//! The label set varies with kernel version, so [`Memory`] exposes an
//! open-ended `get(name)` accessor backed by the snapshot, plus
//! convenience accessors for the well-known labels.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::probe::Prober;
use crate::snapshot::Snapshot;
use sp_common::{Error, Result};

/// Default raw source for memory facts.
pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// Prober for meminfo-format files.
#[derive(Debug, Clone)]
pub struct MeminfoProber {
    path: PathBuf,
}

impl MeminfoProber {
    /// Prober bound to the kernel's `/proc/meminfo`.
    pub fn new() -> Self {
        Self::with_path(MEMINFO_PATH)
    }

    /// Prober bound to an alternate meminfo-format file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        MeminfoProber { path: path.into() }
    }

    /// The raw source this prober reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for MeminfoProber {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober for MeminfoProber {
    type Value = u64;

    fn parse(&self) -> Result<Snapshot<u64>> {
        debug!(path = %self.path.display(), "reading meminfo source");
        let content =
            fs::read_to_string(&self.path).map_err(|source| Error::SourceUnavailable {
                path: self.path.clone(),
                source,
            })?;
        parse_meminfo_content(&content)
    }
}

/// Parse meminfo-format content into a snapshot.
///
/// Lenient by default: lines without a usable key or integer value are
/// skipped, since the kernel format carries informational lines. A line
/// whose unit token is present and not "kB" (case-insensitive) fails the
/// whole parse with [`Error::UnitMismatch`] naming the raw label.
///
/// Duplicate labels normalizing to the same key are last-write-wins.
pub fn parse_meminfo_content(content: &str) -> Result<Snapshot<u64>> {
    let mut store: BTreeMap<String, u64> = BTreeMap::new();

    for line in content.lines() {
        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        if label.is_empty() {
            continue;
        }

        let mut tokens = rest.split_whitespace();
        let Some(value_token) = tokens.next() else {
            trace!(label, "skipping value-less line");
            continue;
        };
        let Ok(value) = value_token.parse::<u64>() else {
            trace!(label, value_token, "skipping non-integer value");
            continue;
        };

        // Absence of a unit token is not itself an error.
        if let Some(unit) = tokens.next() {
            if !unit.eq_ignore_ascii_case("kb") {
                return Err(Error::UnitMismatch {
                    entry: label.to_string(),
                    found: unit.to_string(),
                });
            }
        }

        store.insert(normalize_label(label), value);
    }

    debug!(entries = store.len(), "meminfo parse complete");
    Ok(Snapshot::new(store))
}

/// Normalize a raw meminfo label into a safe, lowercase, underscore-only
/// key: `(` becomes `_`, one trailing `)` is stripped if present, any
/// remaining `)` becomes `_`, and the result is lowercased.
///
/// Two distinct raw labels can normalize to the same key; the store keeps
/// whichever came last.
fn normalize_label(label: &str) -> String {
    let mut holder = label.replace('(', "_");
    if holder.ends_with(')') {
        holder.pop();
    }
    holder.replace(')', "_").to_lowercase()
}

/// Memory facts mounted from the current meminfo snapshot.
///
/// Owns its prober and exactly one live snapshot; `refresh()` swaps in a
/// whole new snapshot or, on failure, leaves the current one untouched.
#[derive(Debug, Clone)]
pub struct Memory {
    prober: MeminfoProber,
    data: Snapshot<u64>,
}

impl Memory {
    /// Unit of measure for every value in the snapshot.
    pub const UNIT: &'static str = "kB";

    /// Probe the kernel's meminfo source once and mount the result.
    pub fn new() -> Result<Self> {
        Self::with_prober(MeminfoProber::new())
    }

    /// Probe an explicitly bound prober once and mount the result.
    pub fn with_prober(prober: MeminfoProber) -> Result<Self> {
        let data = prober.parse()?;
        Ok(Memory { prober, data })
    }

    /// Re-probe the source, replacing the snapshot atomically.
    ///
    /// All-or-nothing: a failed parse propagates the error and the
    /// previously mounted snapshot remains unchanged.
    pub fn refresh(&mut self) -> Result<()> {
        let data = self.prober.parse()?;
        self.data = data;
        Ok(())
    }

    /// The unit every value is expressed in.
    pub fn unit(&self) -> &'static str {
        Self::UNIT
    }

    /// Look up any attribute by its normalized label.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.data.get(name).copied()
    }

    /// The full current snapshot.
    pub fn snapshot(&self) -> &Snapshot<u64> {
        &self.data
    }

    /// Total usable RAM.
    pub fn mem_total(&self) -> Option<u64> {
        self.get("memtotal")
    }

    /// RAM left completely unused.
    pub fn mem_free(&self) -> Option<u64> {
        self.get("memfree")
    }

    /// Kernel estimate of RAM available for new workloads.
    pub fn mem_available(&self) -> Option<u64> {
        self.get("memavailable")
    }

    /// RAM used for block-device buffers.
    pub fn buffers(&self) -> Option<u64> {
        self.get("buffers")
    }

    /// RAM used by the page cache.
    pub fn cached(&self) -> Option<u64> {
        self.get("cached")
    }

    /// Total swap space.
    pub fn swap_total(&self) -> Option<u64> {
        self.get("swaptotal")
    }

    /// Unused swap space.
    pub fn swap_free(&self) -> Option<u64> {
        self.get("swapfree")
    }
}
