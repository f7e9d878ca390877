//! Watch mode
//!
//! Rebuilds the snapshot whenever content under the content root changes.
//! Filesystem events are debounced per path and coalesced into batches; each
//! batch triggers one full build pass.

use crate::error::ApiError;
use crate::snapshot::{run_build, BuildRequest, BuildSummary};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Build inputs reused for every rebuild
    pub build: BuildRequest,
    /// Per-path debounce window in milliseconds
    pub debounce_ms: u64,
    /// Quiet period before a pending batch is rebuilt
    pub batch_window_ms: u64,
    /// Pending paths that force an immediate rebuild
    pub max_batch_size: usize,
    /// File name suffixes never worth a rebuild (editor swap files and the like)
    pub ignore_suffixes: Vec<String>,
}

impl WatchConfig {
    pub fn new(build: BuildRequest) -> Self {
        Self {
            build,
            debounce_ms: 100,
            batch_window_ms: 50,
            max_batch_size: 100,
            ignore_suffixes: vec![
                ".swp".to_string(),
                ".tmp".to_string(),
                "~".to_string(),
                ".DS_Store".to_string(),
            ],
        }
    }
}

/// Filesystem change event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    /// Path the event is keyed by
    pub fn path(&self) -> &Path {
        match self {
            ChangeEvent::Created(p) | ChangeEvent::Modified(p) | ChangeEvent::Removed(p) => p,
            ChangeEvent::Renamed { to, .. } => to,
        }
    }

    fn from_notify(event: Event) -> Option<Self> {
        let mut paths = event.paths.into_iter();
        match event.kind {
            EventKind::Create(_) => paths.next().map(ChangeEvent::Created),
            EventKind::Modify(notify::event::ModifyKind::Name(_)) => {
                match (paths.next(), paths.next()) {
                    (Some(from), Some(to)) => Some(ChangeEvent::Renamed { from, to }),
                    (Some(path), None) => Some(ChangeEvent::Modified(path)),
                    _ => None,
                }
            }
            EventKind::Modify(_) => paths.next().map(ChangeEvent::Modified),
            EventKind::Remove(_) => paths.next().map(ChangeEvent::Removed),
            _ => None,
        }
    }
}

/// Absolute form of the snapshot path as notify reports it. The file itself may
/// not exist yet, so only its parent is canonicalized.
fn resolve_output_path(output: &Path) -> PathBuf {
    match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => dunce::canonicalize(parent)
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| output.to_path_buf()),
        _ => output.to_path_buf(),
    }
}

/// Groups events by path and debounces repeats
pub(crate) struct EventBatcher {
    debounce: Duration,
    max_batch_size: usize,
    ignore_suffixes: Vec<String>,
    /// The snapshot file itself may live under the content root
    ignore_path: Option<PathBuf>,
    pending: HashMap<PathBuf, ChangeEvent>,
    last_seen: HashMap<PathBuf, Instant>,
}

impl EventBatcher {
    pub(crate) fn new(config: &WatchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            max_batch_size: config.max_batch_size,
            ignore_suffixes: config.ignore_suffixes.clone(),
            ignore_path: Some(resolve_output_path(&config.build.output)),
            pending: HashMap::new(),
            last_seen: HashMap::new(),
        }
    }

    /// Queue an event. Returns true once the batch is full.
    pub(crate) fn add_event(&mut self, event: ChangeEvent) -> bool {
        let path = event.path().to_path_buf();
        if self.should_ignore(&path) {
            debug!(path = %path.display(), "Ignoring change");
            return false;
        }

        let now = Instant::now();
        let repeated = self
            .last_seen
            .get(&path)
            .is_some_and(|last| now.duration_since(*last) < self.debounce);
        self.pending.insert(path.clone(), event);
        if repeated {
            return false;
        }
        self.last_seen.insert(path, now);
        self.pending.len() >= self.max_batch_size
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn take_batch(&mut self) -> Vec<ChangeEvent> {
        self.last_seen.clear();
        self.pending.drain().map(|(_, event)| event).collect()
    }

    fn should_ignore(&self, path: &Path) -> bool {
        if self.ignore_path.as_deref() == Some(path) {
            return true;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.ignore_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Rebuild-on-change daemon
pub struct WatchDaemon {
    config: WatchConfig,
    running: Arc<RwLock<bool>>,
}

impl WatchDaemon {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Shared flag; setting it to false stops the loop after the current wait.
    pub fn running_flag(&self) -> Arc<RwLock<bool>> {
        Arc::clone(&self.running)
    }

    pub fn stop(&self) {
        *self.running.write() = false;
    }

    /// Build once, then block rebuilding on every change batch until stopped.
    ///
    /// A failing initial build is fatal. Failures of later rebuilds are logged
    /// and the last good snapshot stays on disk.
    pub fn start(&self) -> Result<(), ApiError> {
        *self.running.write() = true;

        let initial = self.rebuild()?;
        info!(
            nodes = initial.nodes,
            tiles = initial.tiles,
            "Initial build complete"
        );

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })?;
        let content_root = dunce::canonicalize(&self.config.build.content_root).map_err(|source| {
            crate::error::BuildError::Io {
                path: self.config.build.content_root.clone(),
                source,
            }
        })?;
        watcher.watch(&content_root, RecursiveMode::Recursive)?;
        info!(content_root = %self.config.build.content_root.display(), "Watching content");

        let mut batcher = EventBatcher::new(&self.config);
        let batch_window = Duration::from_millis(self.config.batch_window_ms);
        let mut last_event = Instant::now();

        while *self.running.read() {
            let mut flush = false;
            match rx.recv_timeout(batch_window) {
                Ok(Ok(event)) => {
                    if let Some(change) = ChangeEvent::from_notify(event) {
                        flush = batcher.add_event(change);
                        last_event = Instant::now();
                    }
                }
                Ok(Err(e)) => warn!("Watch error: {}", e),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if !batcher.is_empty() && (flush || last_event.elapsed() >= batch_window) {
                let batch = batcher.take_batch();
                info!(event_count = batch.len(), "Content changed, rebuilding");
                if let Err(e) = self.rebuild() {
                    error!(error = %e, "Rebuild failed; keeping previous snapshot");
                }
            }
        }

        info!("Watch stopped");
        Ok(())
    }

    fn rebuild(&self) -> Result<BuildSummary, ApiError> {
        run_build(&self.config.build)
    }
}
