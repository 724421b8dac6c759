//! Presence checks for known package-manager executables.
//!
//! Two fixed checklists: the system group ("linux") and the language group
//! ("python"). Each name is resolved against the execution search path;
//! lookups cannot fail, only report absent, so this domain has no failure
//! mode of its own.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use tracing::{debug, trace};

use crate::probe::Prober;
use crate::snapshot::Snapshot;
use sp_common::Result;

/// Group label for system package managers.
pub const SYSTEM_GROUP: &str = "linux";

/// Group label for language package managers.
pub const LANGUAGE_GROUP: &str = "python";

/// System package-manager executables checked for presence.
pub const SYSTEM_PACKAGE_MANAGERS: &[&str] = &["apt", "dpkg", "snap"];

/// Language package-manager executables checked for presence.
pub const LANGUAGE_PACKAGE_MANAGERS: &[&str] = &["conda", "pdm", "pip", "pip3", "poetry"];

/// Executable name → present on the search path.
pub type ToolAvailability = BTreeMap<String, bool>;

/// Resolve an executable name against an explicit search path string.
///
/// Presence means some entry of `path_env` contains a regular file with
/// that name that is executable. Split off from the prober so tests can
/// point it at a scratch directory instead of the live `PATH`.
pub fn resolve_in_path(name: &str, path_env: &str) -> bool {
    env::split_paths(path_env).any(|dir| is_executable(&dir.join(name)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Prober for package-manager executable presence.
#[derive(Debug, Clone, Default)]
pub struct PkgManagerProber;

impl PkgManagerProber {
    pub fn new() -> Self {
        PkgManagerProber
    }

    fn check_group(&self, checklist: &[&str], path_env: &str) -> ToolAvailability {
        checklist
            .iter()
            .map(|name| {
                let present = resolve_in_path(name, path_env);
                trace!(tool = name, present, "checked executable");
                (name.to_string(), present)
            })
            .collect()
    }
}

impl Prober for PkgManagerProber {
    type Value = ToolAvailability;

    /// Every snapshot from this prober carries exactly the two group
    /// keys, [`SYSTEM_GROUP`] and [`LANGUAGE_GROUP`].
    fn parse(&self) -> Result<Snapshot<ToolAvailability>> {
        let path_env = env::var("PATH").unwrap_or_default();
        debug!("resolving package-manager executables");

        let mut store = BTreeMap::new();
        store.insert(
            SYSTEM_GROUP.to_string(),
            self.check_group(SYSTEM_PACKAGE_MANAGERS, &path_env),
        );
        store.insert(
            LANGUAGE_GROUP.to_string(),
            self.check_group(LANGUAGE_PACKAGE_MANAGERS, &path_env),
        );
        Ok(Snapshot::new(store))
    }
}

/// Package-manager facts mounted from the current presence snapshot.
#[derive(Debug, Clone)]
pub struct PkgManager {
    prober: PkgManagerProber,
    data: Snapshot<ToolAvailability>,
}

impl PkgManager {
    /// Probe the search path once and mount the result.
    pub fn new() -> Result<Self> {
        let prober = PkgManagerProber::new();
        let data = prober.parse()?;
        Ok(PkgManager { prober, data })
    }

    /// Re-probe the search path, replacing the snapshot atomically.
    pub fn refresh(&mut self) -> Result<()> {
        let data = self.prober.parse()?;
        self.data = data;
        Ok(())
    }

    /// The full underlying two-group mapping, read-only.
    pub fn raw(&self) -> &Snapshot<ToolAvailability> {
        &self.data
    }

    /// Presence map for one group label.
    pub fn group(&self, name: &str) -> Option<&ToolAvailability> {
        self.data.get(name)
    }

    /// Whether a tool in a group is present; `None` if the group or tool
    /// is unknown.
    pub fn is_present(&self, group: &str, tool: &str) -> Option<bool> {
        self.group(group)?.get(tool).copied()
    }

    /// System package managers (apt, dpkg, snap).
    pub fn linux(&self) -> &ToolAvailability {
        self.group(SYSTEM_GROUP).unwrap_or(&EMPTY_GROUP)
    }

    /// Language package managers (conda, pdm, pip, pip3, poetry).
    pub fn python(&self) -> &ToolAvailability {
        self.group(LANGUAGE_GROUP).unwrap_or(&EMPTY_GROUP)
    }
}

// Fallback for the group accessors; unreachable in practice since parse()
// populates both groups, but keeps the accessors panic-free.
static EMPTY_GROUP: ToolAvailability = ToolAvailability::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_populates_both_groups() {
        let snap = PkgManagerProber::new().parse().unwrap();

        assert_eq!(snap.len(), 2);
        let linux = snap.get(SYSTEM_GROUP).unwrap();
        let python = snap.get(LANGUAGE_GROUP).unwrap();

        for name in SYSTEM_PACKAGE_MANAGERS {
            assert!(linux.contains_key(*name), "missing {name} in linux group");
        }
        for name in LANGUAGE_PACKAGE_MANAGERS {
            assert!(python.contains_key(*name), "missing {name} in python group");
        }
    }

    #[test]
    fn test_resolve_absent_name_is_false() {
        // A name that cannot plausibly exist on any host's PATH.
        assert!(!resolve_in_path(
            "sysprober-definitely-not-a-real-tool-9c4f",
            &env::var("PATH").unwrap_or_default()
        ));
    }

    #[test]
    fn test_resolve_in_empty_path_is_false() {
        assert!(!resolve_in_path("apt", ""));
    }

    #[test]
    fn test_group_accessors_cover_full_checklists() {
        let pkg = PkgManager::new().unwrap();

        let linux: Vec<&str> = pkg.linux().keys().map(String::as_str).collect();
        let python: Vec<&str> = pkg.python().keys().map(String::as_str).collect();
        assert_eq!(linux, SYSTEM_PACKAGE_MANAGERS);
        assert_eq!(python, LANGUAGE_PACKAGE_MANAGERS);
    }

    #[test]
    fn test_pkgmanager_accessors_agree_with_raw() {
        let pkg = PkgManager::new().unwrap();

        assert_eq!(Some(pkg.linux()), pkg.raw().get(SYSTEM_GROUP));
        assert_eq!(Some(pkg.python()), pkg.raw().get(LANGUAGE_GROUP));
        assert_eq!(
            pkg.is_present(SYSTEM_GROUP, "apt"),
            pkg.linux().get("apt").copied()
        );
        assert_eq!(pkg.is_present("windows", "apt"), None);
    }
}
