use serde::{Deserialize, Serialize};

/// A single file in a repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Base name of the file
    pub name: String,
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self { path, name, size }
    }

    /// True when the file sits at the repository root
    pub fn is_top_level(&self) -> bool {
        !self.path.contains('/')
    }

    /// Reason this entry cannot be part of a well-formed listing, if any
    pub fn defect(&self) -> Option<&'static str> {
        if self.path.is_empty() {
            Some("empty path")
        } else if self.path.starts_with('/') {
            Some("absolute path")
        } else if self.path.split('/').any(|segment| segment == "..") {
            Some("parent directory segment")
        } else {
            None
        }
    }
}

/// Files of a repository in traversal order; duplicates are kept as-is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileListing {
    entries: Vec<FileEntry>,
}

impl FileListing {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(paths.into_iter().map(|p| FileEntry::new(p, 0)).collect())
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn any_extension(&self, extensions: &[&str]) -> bool {
        self.entries.iter().any(|e| {
            e.name
                .rsplit_once('.')
                .is_some_and(|(stem, ext)| !stem.is_empty() && extensions.contains(&ext))
        })
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl<'a> IntoIterator for &'a FileListing {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
