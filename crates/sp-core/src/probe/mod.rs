//! Host fact probes.
//!
//! One prober per fact domain, all sharing the same contract: `parse()`
//! reads the raw source and returns a fully-populated, structurally valid
//! [`Snapshot`], or an error. Probers never write to the host.
//!
//! The parsing logic is split into pure `parse_*_content` functions so it
//! can be exercised without a live host; the probers own only the raw
//! source acquisition.

mod memory;
mod pkgmanager;

pub use memory::{parse_meminfo_content, Memory, MeminfoProber, MEMINFO_PATH};
pub use pkgmanager::{
    resolve_in_path, PkgManager, PkgManagerProber, ToolAvailability, LANGUAGE_GROUP,
    LANGUAGE_PACKAGE_MANAGERS, SYSTEM_GROUP, SYSTEM_PACKAGE_MANAGERS,
};

use crate::snapshot::Snapshot;
use sp_common::Result;

/// Contract shared by all fact-domain probers.
///
/// A prober is bound to its raw source at construction time; `parse()`
/// takes no input from the caller and performs exactly one read against
/// the external environment.
pub trait Prober {
    /// Value type of the produced snapshot entries.
    type Value;

    /// Read the bound raw source and produce a new snapshot.
    ///
    /// Either a full valid snapshot is produced, or none is; there is no
    /// partial/degraded result.
    fn parse(&self) -> Result<Snapshot<Self::Value>>;
}
