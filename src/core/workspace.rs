use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Per-run scratch space for page files.
///
/// Each run gets its own temporary directory rather than a shared ambient
/// root, so concurrent runs cannot see each other's pages. The directory and
/// everything in it is removed when the workspace is dropped, on every exit
/// path.
pub struct Workspace {
    dir: TempDir,
    pages_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> std::io::Result<Self> {
        let dir = TempDir::with_prefix("flipbook-")?;
        let pages_dir = dir.path().join("pages");
        fs::create_dir(&pages_dir)?;
        debug!(path = %dir.path().display(), "created workspace");
        Ok(Self { dir, pages_dir })
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_workspaces_are_isolated() {
        let a = Workspace::new().unwrap();
        let b = Workspace::new().unwrap();
        assert_ne!(a.pages_dir(), b.pages_dir());
    }

    #[test]
    fn pages_are_removed_when_the_workspace_is_dropped() {
        let ws = Workspace::new().unwrap();
        let root = ws.path().to_path_buf();
        let page = ws.pages_dir().join("page_0001.jpg");
        fs::write(&page, b"pretend jpeg").unwrap();

        drop(ws);
        assert!(!page.exists());
        assert!(!root.exists());
    }
}
