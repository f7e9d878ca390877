//! Snapshot writer

use super::Snapshot;
use crate::error::SnapshotError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a snapshot write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { fingerprint: String },
    /// The artifact on disk already held identical bytes
    Unchanged { fingerprint: String },
}

impl WriteOutcome {
    pub fn fingerprint(&self) -> &str {
        match self {
            WriteOutcome::Written { fingerprint } | WriteOutcome::Unchanged { fingerprint } => {
                fingerprint
            }
        }
    }
}

/// Hex blake3 digest of serialized snapshot bytes.
pub fn snapshot_fingerprint(bytes: &[u8]) -> String {
    hex::encode(blake3::hash(bytes).as_bytes())
}

fn io_error(path: &Path, source: std::io::Error) -> SnapshotError {
    SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Serialize and write a snapshot.
///
/// The file is replaced atomically through a sibling temp file. Identical
/// existing content is left untouched unless `force` is set.
pub fn write_snapshot(
    snapshot: &Snapshot,
    path: &Path,
    pretty: bool,
    force: bool,
) -> Result<WriteOutcome, SnapshotError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(snapshot)?
    } else {
        serde_json::to_vec(snapshot)?
    };
    let fingerprint = snapshot_fingerprint(&bytes);

    if !force {
        if let Ok(existing) = std::fs::read(path) {
            if snapshot_fingerprint(&existing) == fingerprint {
                debug!(path = %path.display(), "Snapshot unchanged");
                return Ok(WriteOutcome::Unchanged { fingerprint });
            }
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }

    let tmp_path = temp_path_for(path);
    std::fs::write(&tmp_path, &bytes).map_err(|e| io_error(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_error(path, e))?;

    info!(path = %path.display(), bytes = bytes.len(), "Wrote snapshot");
    Ok(WriteOutcome::Written { fingerprint })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
