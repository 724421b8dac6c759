//! Sysprober - point-in-time host fact probes.
//!
//! Collects facts about the underlying host without mutating it:
//! - Memory statistics from the kernel meminfo pseudo-file
//! - Presence of known package-manager executables on the search path
//!
//! Each fact domain follows the same shape: a prober reads the raw source
//! and parses it into an immutable [`snapshot::Snapshot`], and a consumer
//! object mounts the snapshot behind named accessors with an explicit
//! `refresh()` that swaps in a whole new snapshot or leaves the old one
//! untouched on failure.

pub mod logging;
pub mod probe;
pub mod snapshot;

pub use probe::{Memory, MeminfoProber, PkgManager, PkgManagerProber, Prober};
pub use snapshot::Snapshot;
