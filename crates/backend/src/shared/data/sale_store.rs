use contracts::domain::a001_sale_record::SaleRecord;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock, Weak};
use thiserror::Error;
use uuid::Uuid;

/// Callback invoked with the new ledger contents after every change.
pub type SaleListener = Arc<dyn Fn(&[SaleRecord]) + Send + Sync>;

type ListenerRegistry = Mutex<Vec<(Uuid, SaleListener)>>;

#[derive(Debug, Error)]
pub enum SaleStoreError {
    #[error("failed to read ledger {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse ledger {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read access to the sales ledger.
///
/// `snapshot` hands out an immutable view; holders can keep it while the
/// store moves on.
pub trait SaleSnapshotStore: Send + Sync {
    fn snapshot(&self) -> Arc<Vec<SaleRecord>>;

    fn subscribe(&self, listener: SaleListener) -> Subscription;
}

/// Handle returned by [`SaleSnapshotStore::subscribe`]. The listener stays
/// registered until [`Subscription::unsubscribe`] is called.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: Uuid,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut listeners = registry.lock().unwrap_or_else(|e| e.into_inner());
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Append-only in-memory ledger. Writers swap in a new `Arc`, so readers
/// never see a half-applied change.
#[derive(Default)]
pub struct InMemorySaleStore {
    records: RwLock<Arc<Vec<SaleRecord>>>,
    listeners: Arc<ListenerRegistry>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self {
            records: RwLock::new(Arc::new(records)),
            listeners: Arc::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn append(&self, record: SaleRecord) -> usize {
        self.extend(vec![record])
    }

    /// Appends `records` and returns the new ledger size.
    pub fn extend(&self, records: Vec<SaleRecord>) -> usize {
        let updated = {
            let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
            let mut next = Vec::with_capacity(guard.len() + records.len());
            next.extend(guard.iter().cloned());
            next.extend(records);
            *guard = Arc::new(next);
            Arc::clone(&guard)
        };
        self.notify(&updated);
        updated.len()
    }

    pub fn replace_all(&self, records: Vec<SaleRecord>) {
        let updated = Arc::new(records);
        {
            let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
            *guard = Arc::clone(&updated);
        }
        self.notify(&updated);
    }

    /// Replaces the ledger with the JSON array stored at `path`.
    pub fn load_json_file(&self, path: &Path) -> Result<usize, SaleStoreError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SaleStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SaleRecord> =
            serde_json::from_str(&contents).map_err(|source| SaleStoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let count = records.len();
        self.replace_all(records);
        tracing::info!("Ledger loaded from {}: {} records", path.display(), count);
        Ok(count)
    }

    fn notify(&self, records: &Arc<Vec<SaleRecord>>) {
        // call listeners outside the lock so they may subscribe or unsubscribe
        let listeners: Vec<SaleListener> = {
            let guard = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            guard.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(records.as_slice());
        }
    }
}

impl SaleSnapshotStore for InMemorySaleStore {
    fn snapshot(&self) -> Arc<Vec<SaleRecord>> {
        let guard = self.records.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn subscribe(&self, listener: SaleListener) -> Subscription {
        let id = Uuid::new_v4();
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, listener));
        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sale(id: &str) -> SaleRecord {
        SaleRecord::emitted(id, "2024-03-01T10:00:00", "boleta", 10.0)
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_appends() {
        let store = InMemorySaleStore::from_records(vec![sale("1")]);
        let before = store.snapshot();
        assert_eq!(store.append(sale("2")), 2);
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_subscribers_are_notified_until_unsubscribed() {
        let store = InMemorySaleStore::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_by_listener = Arc::clone(&seen);
        let subscription = store.subscribe(Arc::new(move |records: &[SaleRecord]| {
            seen_by_listener.store(records.len(), Ordering::SeqCst);
        }));

        store.extend(vec![sale("1"), sale("2")]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        subscription.unsubscribe();
        store.append(sale("3"));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("ledger-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"id": "B001-1", "emittedAt": "2024-03-01", "status": "emitted", "total": 25.5}]"#,
        )
        .unwrap();

        let store = InMemorySaleStore::new();
        assert_eq!(store.load_json_file(&path).unwrap(), 1);
        assert_eq!(store.snapshot()[0].total, 25.5);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_sample_ledger() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/ledger.sample.json");
        let store = InMemorySaleStore::new();
        assert_eq!(store.load_json_file(&path).unwrap(), 4);
        let emitted = store.snapshot().iter().filter(|r| r.is_emitted()).count();
        assert_eq!(emitted, 3);
    }

    #[test]
    fn test_load_json_file_errors() {
        let store = InMemorySaleStore::new();
        let missing = std::env::temp_dir().join(format!("missing-{}.json", Uuid::new_v4()));
        assert!(matches!(
            store.load_json_file(&missing),
            Err(SaleStoreError::Io { .. })
        ));

        let broken = std::env::temp_dir().join(format!("broken-{}.json", Uuid::new_v4()));
        std::fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            store.load_json_file(&broken),
            Err(SaleStoreError::Parse { .. })
        ));
        std::fs::remove_file(&broken).ok();
        assert!(store.is_empty());
    }
}
