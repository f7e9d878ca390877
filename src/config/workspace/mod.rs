//! Workspace-relative path settings.

pub mod content_paths;
