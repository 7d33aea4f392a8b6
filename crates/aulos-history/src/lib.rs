#![forbid(unsafe_code)]

//! Recently played URLs.
//!
//! [`PlayHistory`] keeps the list in memory and writes it through a
//! [`HistoryStore`] on every change.

mod error;
mod file;
mod history;
mod store;

pub use error::{HistoryError, HistoryResult};
pub use file::JsonFileHistoryStore;
pub use history::{MAX_ENTRIES, PlayHistory};
pub use store::{HistoryStore, MemoryHistoryStore};
