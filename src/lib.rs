//! Client-side cocktail search session core: a single-writer session store,
//! a debouncing search dispatcher with switch semantics, durable favorites,
//! and best-effort cross-instance sync.
//!
//! # Examples
//!
//! Plain in-memory usage with [`core::store::SessionStore`]:
//! ```
//! use barkeep::{core::store::SessionStore, drink::Drink};
//!
//! let mut store = SessionStore::new();
//! store.set_results(Some(vec![
//!     Drink::new("11007", "Margarita"),
//!     Drink::new("11118", "Blue Margarita"),
//! ]));
//!
//! let favorites = store.toggle_favorite(Drink::new("11118", "Blue Margarita"));
//! assert_eq!(favorites.len(), 1);
//! assert!(store.is_favorite("11118"));
//!
//! store.toggle_show_favorites_only();
//! let shown = store.display_results();
//! assert_eq!(shown.len(), 1);
//! assert_eq!(shown[0].id, "11118");
//! ```
//!
//! Full session runtime with durable ledger and live provider:
//! ```no_run
//! use std::sync::Arc;
//!
//! use barkeep::{
//!     core::store::SessionStore,
//!     persist::{memory::MemoryKvStore, sqlite::SqliteKvStore},
//!     provider::http::HttpProvider,
//!     runtime::handle::{SessionConfig, spawn_session},
//!     types::SearchIntent,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let ledger = SqliteKvStore::open("session.db").expect("open ledger");
//! let handle = spawn_session(
//!     SessionStore::new(),
//!     Arc::new(HttpProvider::new()),
//!     Some(Box::new(ledger)),
//!     Some(Box::new(MemoryKvStore::new())),
//!     None,
//!     SessionConfig::default(),
//! );
//! handle.search(SearchIntent::name("margarita")).await.expect("search");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// In-memory session store and derived views.
pub mod core;
/// Detail-view loader and its user-facing messages.
pub mod detail;
/// Drink records and ingredient derivation.
pub mod drink;
/// Key-value persistence: ledger, snapshot, and scroll marker.
pub mod persist;
/// Search provider seam and HTTP implementation.
pub mod provider;
/// Session runtime handle and events.
pub mod runtime;
/// Cross-instance broadcast channel.
pub mod sync;
/// Shared primitive types and search intents.
pub mod types;
