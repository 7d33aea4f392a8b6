use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{error::HistoryResult, store::HistoryStore};

const FORMAT_VERSION: u32 = 1;

/// On-disk document. Kept private so the schema stays an implementation detail.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    entries: Vec<String>,
}

/// History persisted as a small JSON document.
///
/// Missing, empty or unparsable files load as an empty history; the next
/// save overwrites them.
#[derive(Clone, Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> HistoryResult<Vec<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<HistoryFile>(&bytes) {
            Ok(file) => Ok(file.entries),
            Err(e) => {
                warn!(path = %self.path.display(), %e, "ignoring unreadable history file");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[String]) -> HistoryResult<()> {
        let file = HistoryFile {
            version: FORMAT_VERSION,
            entries: entries.to_vec(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&file)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}
