//! Durable key-value persistence: favorites ledger, session snapshot,
//! and scroll marker codecs.

/// In-memory key-value store.
pub mod memory;
/// SQLite-backed key-value store.
pub mod sqlite;

use crate::{core::store::SessionSnapshot, drink::Drink};

/// Ledger key holding the favorites list as a JSON array.
pub const FAVORITES_KEY: &str = "cocktail_favorites";
/// Ledger key holding the last successful search snapshot.
pub const SEARCH_STATE_KEY: &str = "home_search_state";
/// Session-store key holding the saved scroll offset.
pub const SCROLL_POSITION_KEY: &str = "home_scroll_position";

/// Persistence failure.
#[derive(Debug)]
pub enum PersistError {
    /// SQLite-level failure.
    Sqlite(rusqlite::Error),
    /// JSON encode/decode failure, including corrupt stored records.
    Serde(serde_json::Error),
    /// Any other failure.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Convenience alias for persistence results.
pub type PersistResult<T> = Result<T, PersistError>;

/// Synchronous per-origin durable key-value store.
///
/// Implementations back either the durable ledger (survives reload) or a
/// session-scoped store that does not.
pub trait KvStore: Send {
    /// Reads the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Writes `value` under `key`, replacing any prior value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
    /// Removes `key` if present.
    fn remove(&mut self, key: &str) -> PersistResult<()>;
}

/// Reads the favorites ledger; `Ok(None)` when absent.
///
/// A corrupt record surfaces as `Err(Serde)`; callers leave the in-memory
/// favorites untouched in that case.
pub fn load_favorites(kv: &dyn KvStore) -> PersistResult<Option<Vec<Drink>>> {
    let Some(raw) = kv.get(FAVORITES_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write-through of the favorites list.
pub fn save_favorites(kv: &mut dyn KvStore, favorites: &[Drink]) -> PersistResult<()> {
    let raw = serde_json::to_string(favorites)?;
    kv.set(FAVORITES_KEY, &raw)
}

/// Reads the session snapshot; `Ok(None)` when absent.
pub fn load_snapshot(kv: &dyn KvStore) -> PersistResult<Option<SessionSnapshot>> {
    let Some(raw) = kv.get(SEARCH_STATE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write-through of the session snapshot after a successful settle.
pub fn save_snapshot(kv: &mut dyn KvStore, snapshot: &SessionSnapshot) -> PersistResult<()> {
    let raw = serde_json::to_string(snapshot)?;
    kv.set(SEARCH_STATE_KEY, &raw)
}

/// Deletes the session snapshot so a stale one cannot resurrect on reload.
pub fn clear_snapshot(kv: &mut dyn KvStore) -> PersistResult<()> {
    kv.remove(SEARCH_STATE_KEY)
}

/// Reads the saved scroll offset; unparseable markers are treated as absent.
pub fn load_scroll(kv: &dyn KvStore) -> PersistResult<Option<u32>> {
    let Some(raw) = kv.get(SCROLL_POSITION_KEY)? else {
        return Ok(None);
    };
    Ok(raw.trim().parse().ok())
}

/// Write-through of the scroll offset.
pub fn save_scroll(kv: &mut dyn KvStore, offset: u32) -> PersistResult<()> {
    kv.set(SCROLL_POSITION_KEY, &offset.to_string())
}

/// Removes the scroll marker; new results invalidate old scroll context.
pub fn clear_scroll(kv: &mut dyn KvStore) -> PersistResult<()> {
    kv.remove(SCROLL_POSITION_KEY)
}
