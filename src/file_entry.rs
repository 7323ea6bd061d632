use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A post file read fully into memory for a single read-modify-write cycle
#[derive(Debug)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn read(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let content = fs::read(path)?;
        Ok(Self {
            name,
            path: path.to_path_buf(),
            content,
        })
    }
}
