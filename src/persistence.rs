//! Persistence of the latest match snapshot for one session.
//!
//! Only the most recent snapshot is kept. Gameplay never depends on these calls succeeding; hosts
//! log failures and carry on with the in-memory state.

use crate::models::{MatchPhase, MatchState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Errors from loading, saving or clearing a snapshot.
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// Parsed, but not a state the match could be in.
    Inconsistent,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "snapshot I/O failed: {}", e),
            PersistenceError::Serde(e) => write!(f, "snapshot is not valid JSON: {}", e),
            PersistenceError::Inconsistent => write!(f, "snapshot holds an inconsistent match"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Serde(e) => Some(e),
            PersistenceError::Inconsistent => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Serde(e)
    }
}

/// Serialized form: the match state and when it was written.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub state: MatchState,
}

impl Snapshot {
    pub fn now(state: &MatchState) -> Self {
        Self {
            saved_at: Utc::now(),
            state: state.clone(),
        }
    }

    /// Parse a stored blob, rejecting states that fail `MatchState::is_consistent`.
    pub fn decode(bytes: &[u8]) -> Result<MatchState, PersistenceError> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        if !snapshot.state.is_consistent() {
            return Err(PersistenceError::Inconsistent);
        }
        Ok(snapshot.state)
    }
}

/// Load / save / clear the latest snapshot of a single session.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<MatchState>, PersistenceError>;
    fn save(&self, state: &MatchState) -> Result<(), PersistenceError>;
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// Write `state` after a transition: saved while a match exists, skipped in Setup.
pub fn persist_after_transition<S: SnapshotStore + ?Sized>(
    store: &S,
    state: &MatchState,
) -> Result<(), PersistenceError> {
    if state.phase == MatchPhase::Setup {
        return Ok(());
    }
    store.save(state)
}

/// One JSON file per session.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `session` under `dir` (`<dir>/<session>.json`).
    pub fn for_session(dir: impl AsRef<Path>, session: impl std::fmt::Display) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", session)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<MatchState>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Snapshot::decode(&bytes).map(Some)
    }

    fn save(&self, state: &MatchState) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec(&Snapshot::now(state))?;
        // Write then rename so a crash never leaves a half-written snapshot.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Delete `<dir>/*.json` snapshots not written for at least `max_age`, skipping sessions for
/// which `is_live(session)` holds. A missing directory counts as empty. Returns the number removed.
pub fn remove_stale_snapshots<F>(
    dir: impl AsRef<Path>,
    max_age: Duration,
    is_live: F,
) -> Result<usize, PersistenceError>
where
    F: Fn(&str) -> bool,
{
    let entries = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let session = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s,
            None => continue,
        };
        if is_live(session) {
            continue;
        }
        // A modification time in the future reads as fresh.
        let stale = fs::metadata(&path)?
            .modified()?
            .elapsed()
            .map(|age| age >= max_age)
            .unwrap_or(false);
        if stale {
            FileStore::new(&path).clear()?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// A write queued on a [`SnapshotWriter`].
#[derive(Clone, Debug)]
pub enum SnapshotOp {
    /// `persist_after_transition` with this state.
    Save(MatchState),
    Clear,
}

/// Serialises snapshot writes for one session; a write superseded by a newer one is skipped.
#[derive(Debug)]
pub struct SnapshotWriter<S> {
    store: S,
    latest: AtomicU64,
    write_lock: Mutex<()>,
}

impl<S> SnapshotWriter<S>
where
    S: SnapshotStore + Send + Sync + 'static,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            latest: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Queue `op` on the blocking pool. Callers drop the handle: gameplay never waits on (or fails
    /// with) a write. Must be called from within a tokio runtime.
    pub fn submit(self: &Arc<Self>, op: SnapshotOp) -> tokio::task::JoinHandle<()> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let writer = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let _guard = match writer.write_lock.lock() {
                Ok(g) => g,
                Err(_) => return,
            };
            if writer.latest.load(Ordering::SeqCst) != generation {
                return;
            }
            let result = match op {
                SnapshotOp::Save(state) => persist_after_transition(&writer.store, &state),
                SnapshotOp::Clear => writer.store.clear(),
            };
            if let Err(e) = result {
                log::warn!("Snapshot not written: {}", e);
            }
        })
    }
}

/// In-memory blob store; holds the serialized snapshot exactly as a file store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw serialized snapshot, if any.
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|g| g.clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<MatchState>, PersistenceError> {
        match self.blob() {
            Some(json) => Snapshot::decode(json.as_bytes()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, state: &MatchState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&Snapshot::now(state))?;
        let mut g = self
            .blob
            .lock()
            .map_err(|_| std::io::Error::new(ErrorKind::Other, "lock error"))?;
        *g = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        let mut g = self
            .blob
            .lock()
            .map_err(|_| std::io::Error::new(ErrorKind::Other, "lock error"))?;
        *g = None;
        Ok(())
    }
}
