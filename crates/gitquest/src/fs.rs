//! Virtual file tree for the simulated workspace.
//!
//! The tree is a plain hierarchy of owned values: a [`Directory`] holds
//! its files and subdirectories directly, every node has exactly one
//! parent, and the root represents the project workspace. Paths are
//! slash-delimited and relative to the root; `..`, absolute paths, and
//! symlinks are not supported and simply fail to resolve.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Tracking status of a file in the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Present in the working tree, never staged or committed.
    Untracked,
    /// Content changed since the last commit.
    Modified,
    /// Marked for inclusion in the next commit.
    Staged,
    /// Committed and unchanged since.
    Unmodified,
}

impl FileStatus {
    /// True for files that `git add` would pick up.
    pub fn is_pending(self) -> bool {
        matches!(self, FileStatus::Untracked | FileStatus::Modified)
    }
}

/// A file in the simulated workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub name: String,
    pub content: String,
    pub status: FileStatus,
}

impl File {
    /// Create a new untracked file.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
            status: FileStatus::Untracked,
        }
    }
}

/// A directory in the simulated workspace.
///
/// The root directory is created once per tutorial; the workspace model
/// is flat two-level (only the root holds subdirectories), enforced at
/// the command layer. Resolution itself descends arbitrarily so that a
/// deeper path is simply not found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub id: String,
    pub name: String,
    pub files: Vec<File>,
    pub dirs: Vec<Directory>,
}

/// Failure reasons for tree insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// An intermediate directory of the path does not exist.
    #[error("no such directory: {0}")]
    NoSuchDirectory(String),

    /// The final path segment is empty.
    #[error("empty entry name")]
    EmptyName,

    /// An entry with that name already exists.
    #[error("entry already exists: {0}")]
    AlreadyExists(String),
}

impl Directory {
    /// Create a new empty directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            files: Vec::new(),
            dirs: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&Directory> {
        self.dirs.iter().find(|d| d.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut Directory> {
        self.dirs.iter_mut().find(|d| d.name == name)
    }

    /// Split a slash-delimited path into directory segments and the
    /// final file name. The file name may be empty (trailing slash).
    fn split_path(path: &str) -> (Vec<&str>, &str) {
        match path.rsplit_once('/') {
            Some((dirs, file)) => (dirs.split('/').collect(), file),
            None => (Vec::new(), path),
        }
    }

    /// Look up the file at `path`.
    pub fn resolve(&self, path: &str) -> Option<&File> {
        let (dirs, name) = Self::split_path(path);
        let mut current = self;
        for segment in dirs {
            current = current.child(segment)?;
        }
        current.files.iter().find(|f| f.name == name)
    }

    /// Look up the file at `path`, mutably.
    pub fn resolve_mut(&mut self, path: &str) -> Option<&mut File> {
        let (dirs, name) = Self::split_path(path);
        let mut current = self;
        for segment in dirs {
            current = current.child_mut(segment)?;
        }
        current.files.iter_mut().find(|f| f.name == name)
    }

    /// Apply `transform` to the file at `path`. An unmatched path is a
    /// no-op returning `false`; callers that must observe failure check
    /// existence first.
    pub fn update_file(&mut self, path: &str, transform: impl FnOnce(&mut File)) -> bool {
        match self.resolve_mut(path) {
            Some(file) => {
                transform(file);
                true
            }
            None => false,
        }
    }

    /// Flatten the tree into (path, file) pairs, depth-first: a
    /// directory's own files first, then each subdirectory in order.
    pub fn walk(&self) -> Vec<(String, &File)> {
        let mut entries = Vec::new();
        self.walk_into("", &mut entries);
        entries
    }

    fn walk_into<'a>(&'a self, prefix: &str, entries: &mut Vec<(String, &'a File)>) {
        for file in &self.files {
            entries.push((format!("{prefix}{}", file.name), file));
        }
        for dir in &self.dirs {
            dir.walk_into(&format!("{prefix}{}/", dir.name), entries);
        }
    }

    /// Stage every untracked or modified file, tree-wide.
    pub fn stage_pending(&mut self) {
        for file in &mut self.files {
            if file.status.is_pending() {
                file.status = FileStatus::Staged;
            }
        }
        for dir in &mut self.dirs {
            dir.stage_pending();
        }
    }

    /// Mark every staged file unmodified, tree-wide. Runs when a commit
    /// is recorded.
    pub fn commit_staged(&mut self) {
        for file in &mut self.files {
            if file.status == FileStatus::Staged {
                file.status = FileStatus::Unmodified;
            }
        }
        for dir in &mut self.dirs {
            dir.commit_staged();
        }
    }

    /// Count of staged files, tree-wide.
    pub fn staged_count(&self) -> usize {
        self.walk()
            .iter()
            .filter(|(_, f)| f.status == FileStatus::Staged)
            .count()
    }

    /// Create an untracked file at `path`. Creating over an existing
    /// entry of the same name is a successful no-op (touch semantics).
    pub fn create_file(&mut self, path: &str, content: &str) -> Result<(), TreeError> {
        let (dirs, name) = Self::split_path(path);
        if name.is_empty() {
            return Err(TreeError::EmptyName);
        }
        let mut current = self;
        for segment in dirs {
            current = current
                .child_mut(segment)
                .ok_or_else(|| TreeError::NoSuchDirectory(segment.to_string()))?;
        }
        if current.files.iter().any(|f| f.name == name) || current.child(name).is_some() {
            return Ok(());
        }
        current.files.push(File::new(name, content));
        Ok(())
    }

    /// Create a first-level directory. Name collisions with an existing
    /// file or directory fail; nested paths are rejected by callers.
    pub fn create_dir(&mut self, name: &str) -> Result<(), TreeError> {
        if name.is_empty() {
            return Err(TreeError::EmptyName);
        }
        if self.files.iter().any(|f| f.name == name) || self.child(name).is_some() {
            return Err(TreeError::AlreadyExists(name.to_string()));
        }
        self.dirs.push(Directory::new(name));
        Ok(())
    }
}
