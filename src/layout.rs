use std::path::{Path, PathBuf};
use tracing::debug;

/// Where interpreter distributions are unpacked on local storage.
///
/// An interpreter named `lua` is considered installed when either
/// `<interpreter_root>/lua` or `<extras_root>/lua` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Primary install root
    pub interpreter_root: PathBuf,
    /// Root for extra modules and libraries shipped alongside interpreters
    pub extras_root: PathBuf,
}

impl InstallLayout {
    pub fn new(interpreter_root: impl Into<PathBuf>, extras_root: impl Into<PathBuf>) -> Self {
        Self {
            interpreter_root: interpreter_root.into(),
            extras_root: extras_root.into(),
        }
    }

    pub fn interpreter_dir(&self, name: &str) -> PathBuf {
        under_root(&self.interpreter_root, name)
    }

    pub fn extras_dir(&self, name: &str) -> PathBuf {
        under_root(&self.extras_root, name)
    }

    /// Returns true if anything (file or directory) exists at either install
    /// location for `name`. Probe failures count as "not there".
    pub fn has_install(&self, name: &str) -> bool {
        probe(&self.interpreter_dir(name)) || probe(&self.extras_dir(name))
    }
}

// Leading separators are dropped so an absolute name still lands under the root
fn under_root(root: &Path, name: &str) -> PathBuf {
    root.join(name.trim_start_matches(std::path::is_separator))
}

fn probe(path: &Path) -> bool {
    match path.try_exists() {
        Ok(found) => found,
        Err(e) => {
            debug!("Install probe failed for {:?}: {}", path, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn layout_in(base: &Path) -> InstallLayout {
        let layout = InstallLayout::new(base.join("interpreters"), base.join("extras"));
        fs::create_dir_all(&layout.interpreter_root).unwrap();
        fs::create_dir_all(&layout.extras_root).unwrap();
        layout
    }

    #[test]
    fn test_paths_are_root_plus_name() {
        let layout = InstallLayout::new("/opt/interp", "/opt/extras");
        assert_eq!(layout.interpreter_dir("lua"), PathBuf::from("/opt/interp/lua"));
        assert_eq!(layout.extras_dir("lua"), PathBuf::from("/opt/extras/lua"));
    }

    #[test]
    fn test_absolute_name_stays_under_root() {
        let layout = InstallLayout::new("/opt/interp", "/opt/extras");
        assert_eq!(layout.interpreter_dir("/tmp/x"), PathBuf::from("/opt/interp/tmp/x"));
        assert_eq!(layout.extras_dir("//lua"), PathBuf::from("/opt/extras/lua"));

        let dir = tempdir().unwrap();
        let layout = layout_in(dir.path());
        let outside = dir.path().to_string_lossy().into_owned();
        assert!(!layout.has_install(&outside));

        fs::create_dir_all(layout.interpreter_dir(&outside)).unwrap();
        assert!(layout.has_install(&outside));
    }

    #[test]
    fn test_has_install_checks_both_roots() {
        let dir = tempdir().unwrap();
        let layout = layout_in(dir.path());

        assert!(!layout.has_install("python"));

        fs::create_dir(layout.extras_dir("python")).unwrap();
        assert!(layout.has_install("python"));

        fs::create_dir(layout.interpreter_dir("lua")).unwrap();
        assert!(layout.has_install("lua"));
    }

    #[test]
    fn test_plain_file_counts_as_installed() {
        let dir = tempdir().unwrap();
        let layout = layout_in(dir.path());

        fs::write(layout.interpreter_dir("jruby"), b"").unwrap();
        assert!(layout.has_install("jruby"));
    }

    #[test]
    fn test_missing_roots_mean_not_installed() {
        let dir = tempdir().unwrap();
        let layout = InstallLayout::new(dir.path().join("nope"), dir.path().join("also-nope"));
        assert!(!layout.has_install("lua"));
    }

    #[test]
    fn test_unreadable_root_counts_as_not_installed() {
        let dir = tempdir().unwrap();
        let file_root = dir.path().join("not-a-dir");
        fs::write(&file_root, b"").unwrap();
        let extras = dir.path().join("extras");
        fs::create_dir(&extras).unwrap();
        let layout = InstallLayout::new(&file_root, &extras);

        // A path below a regular file fails with ENOTDIR instead of Ok(false)
        assert!(layout.interpreter_dir("lua").try_exists().is_err());
        assert!(!layout.has_install("lua"));

        fs::create_dir(layout.extras_dir("lua")).unwrap();
        assert!(layout.has_install("lua"));
    }

    #[test]
    fn test_status_reflects_current_disk_state() {
        let dir = tempdir().unwrap();
        let layout = layout_in(dir.path());

        fs::create_dir(layout.interpreter_dir("bsh")).unwrap();
        assert!(layout.has_install("bsh"));

        fs::remove_dir(layout.interpreter_dir("bsh")).unwrap();
        assert!(!layout.has_install("bsh"));
    }
}
