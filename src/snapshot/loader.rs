//! Snapshot loader

use super::Snapshot;
use crate::error::SnapshotError;
use std::path::Path;
use tracing::warn;

/// Load a snapshot from disk.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load a snapshot, degrading to an empty tree when it is missing or unreadable.
pub fn load_snapshot_or_empty(path: &Path) -> Snapshot {
    match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Snapshot unavailable, using empty tree");
            Snapshot::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_snapshot_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");
        assert!(load_snapshot(&path).is_err());
        let snapshot = load_snapshot_or_empty(&path);
        assert!(snapshot.filetree_map.is_empty());
        assert_eq!(snapshot.filetree_map.root.id, "root");
    }

    #[test]
    fn test_corrupt_snapshot_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_snapshot(&path), Err(SnapshotError::Json(_))));
        assert_eq!(load_snapshot_or_empty(&path), Snapshot::empty());
    }
}
