//! Filetree builder
//!
//! Walks a content directory and produces a [`FiletreeMap`]. Each subdirectory
//! becomes a folder node; a file named after its directory (`skills/skills.txt`)
//! is the folder's index file and is absorbed into the folder node instead of
//! becoming a child. Entries are visited in file-name order.

use super::map::FiletreeMap;
use super::node::Node;
use crate::content::parse_file_content;
use crate::error::BuildError;
use crate::types::NodeId;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

/// Default content file extension
pub const DEFAULT_EXTENSION: &str = "txt";

/// Builds a filetree from a content root directory
pub struct FiletreeBuilder {
    content_root: PathBuf,
    extension: String,
}

impl FiletreeBuilder {
    pub fn new(content_root: PathBuf) -> Self {
        Self {
            content_root,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the content file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Scan the content root into a filetree.
    ///
    /// Fails when the content root does not exist, when any file cannot be
    /// read, or when two nodes derive the same id.
    pub fn build(&self) -> Result<FiletreeMap, BuildError> {
        if !self.content_root.exists() {
            return Err(BuildError::ContentRootMissing(self.content_root.clone()));
        }
        if !self.content_root.is_dir() {
            return Err(BuildError::ContentRootNotDirectory(
                self.content_root.clone(),
            ));
        }
        let root_dir = dunce::canonicalize(&self.content_root).map_err(|e| BuildError::Io {
            path: self.content_root.clone(),
            source: e,
        })?;

        let children = self.scan_directory(&root_dir, &root_dir, None, None)?;
        let map = FiletreeMap::from_root(Node::root(children))?;

        info!(
            content_root = %root_dir.display(),
            nodes = map.len(),
            top_level = map.top_level().len(),
            "Built filetree"
        );
        Ok(map)
    }

    fn scan_directory(
        &self,
        root_dir: &Path,
        dir: &Path,
        parent_id: Option<&str>,
        parent_name: Option<&str>,
    ) -> Result<Vec<Node>, BuildError> {
        let mut children = Vec::new();

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry?;
            let name = normalize_name(entry.file_name());
            let rel_path = relative_path(root_dir, entry.path());
            let file_type = entry.file_type();

            if file_type.is_dir() {
                let mut folder = Node::folder(&name, rel_path, parent_id.map(str::to_string));

                let mut index_name = entry.file_name().to_os_string();
                index_name.push(format!(".{}", self.extension));
                let index_path = entry.path().join(index_name);
                if index_path.is_file() {
                    let content = read_content(&index_path)?;
                    let parsed = parse_file_content(&content);
                    debug!(folder = %name, "Absorbed folder index file");
                    folder.content = Some(content);
                    folder.metadata = parsed.metadata;
                }

                folder.children =
                    self.scan_directory(root_dir, entry.path(), Some(&name), Some(&name))?;
                children.push(folder);
            } else if file_type.is_file() {
                let Some(id) = self.content_file_id(entry.path()) else {
                    debug!(path = %rel_path, "Skipping non-content file");
                    continue;
                };
                if parent_name == Some(id.as_str()) {
                    continue;
                }

                let content = read_content(entry.path())?;
                let parsed = parse_file_content(&content);
                children.push(Node::file(
                    &name,
                    id,
                    rel_path,
                    content,
                    parsed.metadata,
                    parent_id.map(str::to_string),
                ));
            } else {
                debug!(path = %rel_path, "Skipping symlink or special entry");
            }
        }

        Ok(children)
    }

    /// Node id for a content file: its normalized stem, if the extension matches.
    fn content_file_id(&self, path: &Path) -> Option<NodeId> {
        if path.extension() != Some(OsStr::new(&self.extension)) {
            return None;
        }
        let stem = normalize_name(path.file_stem()?);
        if stem.is_empty() {
            None
        } else {
            Some(stem)
        }
    }
}

/// NFC-normalized, lossily decoded file name.
fn normalize_name(name: &OsStr) -> String {
    name.to_string_lossy().nfc().collect()
}

fn relative_path(root_dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root_dir).unwrap_or(path);
    rel.components()
        .map(|c| normalize_name(c.as_os_str()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Read a content file, replacing invalid UTF-8 rather than failing the build.
fn read_content(path: &Path) -> Result<String, BuildError> {
    let bytes = std::fs::read(path).map_err(|e| BuildError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
