use std::sync::Arc;

use aulos_platform::{MaybeSend, Mutex};

use crate::error::HistoryResult;

/// Persistence for the history list.
///
/// `save` always receives the full list, most recent first.
pub trait HistoryStore: MaybeSend {
    fn load(&self) -> HistoryResult<Vec<String>>;

    fn save(&self, entries: &[String]) -> HistoryResult<()>;
}

/// Store that lives as long as the process. Clones share the same list.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `entries`.
    #[must_use]
    pub fn with_entries<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            entries: Arc::new(Mutex::new(entries.into_iter().map(Into::into).collect())),
        }
    }

    /// Last saved list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> HistoryResult<Vec<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, entries: &[String]) -> HistoryResult<()> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}
