use crate::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Output directory relative to the project root
pub const IMAGES_DIR: [&str; 2] = ["assets", "images"];

/// Project root and the directory the images are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub root: PathBuf,
    pub dir: PathBuf,
}

impl OutputLocation {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let dir = IMAGES_DIR
            .iter()
            .fold(root.clone(), |dir, part| dir.join(part));
        Self { root, dir }
    }

    /// The project root is the parent of the tool's own directory.
    pub fn from_tool_dir(tool_dir: impl AsRef<Path>) -> Self {
        let tool_dir = tool_dir.as_ref();
        let tool_dir = fs::canonicalize(tool_dir).unwrap_or_else(|_| tool_dir.to_path_buf());
        let root = match tool_dir.parent() {
            Some(parent) => parent.to_path_buf(),
            None => tool_dir,
        };

        Self::from_root(root)
    }

    /// Create the output directory and any missing parents.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        log::debug!("output directory ready: {}", self.dir.display());
        Ok(())
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}
