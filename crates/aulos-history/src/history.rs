use tracing::{debug, warn};

use crate::{error::HistoryResult, store::HistoryStore};

/// Most entries kept.
pub const MAX_ENTRIES: usize = 10;

/// Played URLs, most recent first, without duplicates.
///
/// Recording a URL that is already present leaves the list untouched; it is
/// not moved to the front.
#[derive(Debug)]
pub struct PlayHistory<S> {
    store: S,
    entries: Vec<String>,
}

impl<S: HistoryStore> PlayHistory<S> {
    /// Load the persisted list. A store that fails to load yields an empty history.
    pub fn open(store: S) -> Self {
        let mut entries = store.load().unwrap_or_else(|e| {
            warn!(%e, "history unavailable, starting empty");
            Vec::new()
        });
        dedup_in_order(&mut entries);
        entries.truncate(MAX_ENTRIES);
        Self { store, entries }
    }

    /// Put `url` at the front and persist.
    ///
    /// Returns `Ok(false)` without touching the store when `url` is blank or
    /// already recorded. The oldest entry is dropped past [`MAX_ENTRIES`].
    pub fn record(&mut self, url: &str) -> HistoryResult<bool> {
        if url.trim().is_empty() || self.contains(url) {
            return Ok(false);
        }
        self.entries.insert(0, url.to_string());
        self.entries.truncate(MAX_ENTRIES);
        debug!(url, len = self.entries.len(), "history recorded");
        self.store.save(&self.entries)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> HistoryResult<()> {
        self.entries.clear();
        self.store.save(&self.entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry == url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn dedup_in_order(entries: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(entries.len());
    entries.retain(|entry| {
        if seen.contains(entry) {
            false
        } else {
            seen.push(entry.clone());
            true
        }
    });
}
