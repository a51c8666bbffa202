//! Session handle and dispatcher loop.
//!
//! One spawned task exclusively owns the [`SessionStore`]; every mutation
//! and read goes through the command channel, so each state transition is
//! atomic from the caller's point of view.

use std::sync::Arc;

use tokio::{
    sync::{broadcast, mpsc, oneshot},
    time::{Duration, Instant, sleep_until},
};
use tracing::{debug, error, warn};

use crate::{
    core::store::{SessionStore, SessionView},
    drink::Drink,
    persist::{self, KvStore, PersistError},
    provider::{DrinkEnvelope, ProviderError, SearchProvider},
    sync::{SyncChannel, SyncHub, SyncMessage},
    types::{SearchIntent, SearchKind},
};

use super::events::SessionEvent;

/// Fixed user-facing message for any provider failure.
pub const SEARCH_ERROR_MESSAGE: &str =
    "Could not reach the cocktail service or process its response.";

/// Failure surfaced through the handle.
#[derive(Debug)]
pub enum RuntimeError {
    /// Ledger or session-store write failed.
    Persist(PersistError),
    /// The session task is gone.
    ChannelClosed,
}

impl From<PersistError> for RuntimeError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Session runtime tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet window collapsing keystroke bursts into one request.
    pub debounce_ms: u64,
    /// Quiet window for scroll-marker writes.
    pub scroll_debounce_ms: u64,
    /// Command channel bound.
    pub command_queue_bound: usize,
    /// Event stream capacity per subscriber.
    pub events_capacity: usize,
    /// Query dispatched at startup when no snapshot was restored and the
    /// store is empty. `None` starts with a blank session.
    pub initial_query: Option<SearchIntent>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            scroll_debounce_ms: 200,
            command_queue_bound: 256,
            events_capacity: 1024,
            initial_query: Some(SearchIntent::name("a")),
        }
    }
}

/// Cloneable handle to a spawned session.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl Clone for SessionHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Search {
        intent: SearchIntent,
    },
    ToggleFavorite {
        drink: Drink,
        resp: oneshot::Sender<Result<Vec<Drink>, RuntimeError>>,
    },
    ToggleFavoritesOnly {
        resp: oneshot::Sender<bool>,
    },
    DisplayResults {
        resp: oneshot::Sender<Vec<Drink>>,
    },
    State {
        resp: oneshot::Sender<SessionView>,
    },
    IsFavorite {
        id: String,
        resp: oneshot::Sender<bool>,
    },
    SaveScroll {
        offset: u32,
    },
    RestoreScroll {
        resp: oneshot::Sender<Option<u32>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

struct Settlement {
    generation: u64,
    term: String,
    outcome: Result<DrinkEnvelope, ProviderError>,
}

/// Spawns the session loop and returns its handle.
///
/// `ledger` is the durable store (favorites + session snapshot),
/// `session_kv` the session-scoped one (scroll marker); either may be
/// absent. `sync` connects this instance to its peers; without one the
/// session runs standalone.
pub fn spawn_session(
    store: SessionStore,
    provider: Arc<dyn SearchProvider>,
    ledger: Option<Box<dyn KvStore>>,
    session_kv: Option<Box<dyn KvStore>>,
    sync: Option<SyncChannel>,
    config: SessionConfig,
) -> SessionHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<SessionEvent>(config.events_capacity.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        let mut ledger = ledger;
        let mut session_kv = session_kv;

        // A private hub keeps the sync arm pending when no channel was given.
        let (_own_hub, mut sync_channel) = match sync {
            Some(channel) => (None, channel),
            None => {
                let hub = SyncHub::default();
                let channel = hub.connect();
                (Some(hub), channel)
            }
        };
        let mut sync_open = true;

        let mut snapshot_restored = false;
        if let Some(kv) = ledger.as_deref() {
            match persist::load_favorites(kv) {
                Ok(Some(favorites)) => store.sync_favorites(favorites),
                Ok(None) => {}
                Err(err) => {
                    warn!(?err, "favorites ledger unreadable, keeping current favorites");
                }
            }
            match persist::load_snapshot(kv) {
                Ok(Some(snapshot)) => {
                    store.restore_snapshot(snapshot);
                    snapshot_restored = true;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(?err, "session snapshot unreadable, treating as absent");
                }
            }
        }

        let debounce = Duration::from_millis(config.debounce_ms);
        let scroll_debounce = Duration::from_millis(config.scroll_debounce_ms);

        let mut pending: Option<SearchIntent> = None;
        let mut debounce_deadline = Instant::now();
        let mut last_forwarded: Option<SearchIntent> = None;
        let mut generation: u64 = 0;
        let mut scroll_pending: Option<u32> = None;
        let mut scroll_deadline = Instant::now();

        let (settle_tx, mut settle_rx) = mpsc::unbounded_channel::<Settlement>();

        if !snapshot_restored && store.results().is_empty() && store.last_search_term().is_empty()
        {
            if let Some(intent) = config.initial_query.clone() {
                if !intent.is_blank() {
                    pending = Some(intent);
                    debounce_deadline = Instant::now() + debounce;
                }
            }
        }

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    match cmd {
                        Command::Search { intent } => {
                            if intent.is_blank() {
                                debug!("blank search intent dropped");
                            } else {
                                pending = Some(intent);
                                debounce_deadline = Instant::now() + debounce;
                            }
                        }
                        Command::ToggleFavorite { drink, resp } => {
                            let favorites = store.toggle_favorite(drink);
                            let mut out = Ok(favorites.clone());
                            if let Some(kv) = ledger.as_deref_mut() {
                                if let Err(err) = persist::save_favorites(kv, &favorites) {
                                    error!(?err, "favorites ledger write failed");
                                    out = Err(RuntimeError::Persist(err));
                                }
                            }
                            sync_channel.post(SyncMessage::FavoritesUpdated {
                                favorites: favorites.clone(),
                            });
                            let _ = events_tx_loop.send(SessionEvent::FavoritesChanged {
                                count: favorites.len(),
                            });
                            let _ = resp.send(out);
                        }
                        Command::ToggleFavoritesOnly { resp } => {
                            let _ = resp.send(store.toggle_show_favorites_only());
                        }
                        Command::DisplayResults { resp } => {
                            let _ = resp.send(store.display_results_cloned());
                        }
                        Command::State { resp } => {
                            let _ = resp.send(store.view());
                        }
                        Command::IsFavorite { id, resp } => {
                            let _ = resp.send(store.is_favorite(&id));
                        }
                        Command::SaveScroll { offset } => {
                            scroll_pending = Some(offset);
                            scroll_deadline = Instant::now() + scroll_debounce;
                        }
                        Command::RestoreScroll { resp } => {
                            let out = session_kv
                                .as_deref()
                                .and_then(|kv| match persist::load_scroll(kv) {
                                    Ok(offset) => offset,
                                    Err(err) => {
                                        warn!(?err, "scroll marker unreadable");
                                        None
                                    }
                                });
                            let _ = resp.send(out);
                        }
                        Command::Shutdown { resp } => {
                            flush_scroll(&mut scroll_pending, session_kv.as_deref_mut());
                            let _ = resp.send(Ok(()));
                            break;
                        }
                    }
                }
                settled = settle_rx.recv() => {
                    let Some(settled) = settled else { break; };
                    if settled.generation != generation {
                        debug!(
                            stale = settled.generation,
                            current = generation,
                            "superseded settlement discarded"
                        );
                        continue;
                    }
                    match settled.outcome {
                        Ok(envelope) => {
                            store.set_results(envelope.drinks);
                            let snapshot = store.export_snapshot();
                            if let Some(kv) = ledger.as_deref_mut() {
                                if let Err(err) = persist::save_snapshot(kv, &snapshot) {
                                    warn!(?err, "session snapshot write failed");
                                }
                            }
                            sync_channel.post(SyncMessage::SearchStateUpdated { snapshot });
                            let _ = events_tx_loop.send(SessionEvent::ResultsUpdated {
                                count: store.results().len(),
                            });
                        }
                        Err(err) => {
                            error!(%err, term = %settled.term, "search failed");
                            // Announce only on an absent-or-different transition,
                            // never on a repeat of the value already shown.
                            let announce = store.last_error() != Some(SEARCH_ERROR_MESSAGE);
                            store.set_error(SEARCH_ERROR_MESSAGE);
                            if let Some(kv) = ledger.as_deref_mut() {
                                if let Err(err) = persist::clear_snapshot(kv) {
                                    warn!(?err, "session snapshot clear failed");
                                }
                            }
                            let _ = events_tx_loop.send(SessionEvent::SearchFailed {
                                message: SEARCH_ERROR_MESSAGE.to_string(),
                            });
                            if announce {
                                let _ = events_tx_loop.send(SessionEvent::ErrorAnnounced {
                                    message: SEARCH_ERROR_MESSAGE.to_string(),
                                });
                            }
                        }
                    }
                }
                message = sync_channel.recv(), if sync_open => {
                    match message {
                        Some(SyncMessage::FavoritesUpdated { favorites }) => {
                            // State-only patch; the sender already persisted.
                            let count = favorites.len();
                            store.sync_favorites(favorites);
                            let _ = events_tx_loop.send(SessionEvent::FavoritesSynced { count });
                        }
                        Some(SyncMessage::SearchStateUpdated { snapshot }) => {
                            if store.is_loading() || store.show_favorites_only() {
                                debug!("peer search state skipped");
                            } else {
                                let term = snapshot.term.clone();
                                store.restore_snapshot(snapshot);
                                let _ = events_tx_loop.send(SessionEvent::SearchStateSynced { term });
                            }
                        }
                        None => {
                            sync_open = false;
                        }
                    }
                }
                _ = sleep_until(debounce_deadline), if pending.is_some() => {
                    let Some(intent) = pending.take() else { continue; };
                    if last_forwarded.as_ref() == Some(&intent) {
                        debug!(term = %intent.value, "unchanged intent suppressed");
                        continue;
                    }
                    last_forwarded = Some(intent.clone());
                    generation += 1;

                    let term = intent.value.trim().to_string();
                    store.start_loading(term.clone());
                    scroll_pending = None;
                    if let Some(kv) = session_kv.as_deref_mut() {
                        if let Err(err) = persist::clear_scroll(kv) {
                            warn!(?err, "scroll marker clear failed");
                        }
                    }
                    let _ = events_tx_loop.send(SessionEvent::SearchStarted {
                        term: term.clone(),
                    });

                    let provider = Arc::clone(&provider);
                    let tx = settle_tx.clone();
                    let dispatched = generation;
                    let kind = intent.kind;
                    tokio::spawn(async move {
                        let outcome = match kind {
                            SearchKind::Name => provider.by_name(&term).await,
                            SearchKind::Ingredient => provider.by_ingredient(&term).await,
                            SearchKind::Id => provider.by_id(&term).await,
                        };
                        let _ = tx.send(Settlement {
                            generation: dispatched,
                            term,
                            outcome,
                        });
                    });
                }
                _ = sleep_until(scroll_deadline), if scroll_pending.is_some() => {
                    flush_scroll(&mut scroll_pending, session_kv.as_deref_mut());
                }
            }
        }
    });

    SessionHandle { cmd_tx, events_tx }
}

impl SessionHandle {
    /// Subscribes to the session event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Submits a search intent. Settlement is observed through events and
    /// state, not the return value.
    pub async fn search(&self, intent: SearchIntent) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(Command::Search { intent })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Toggles `drink` in the favorites set and returns the new list.
    pub async fn toggle_favorite(&self, drink: Drink) -> Result<Vec<Drink>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ToggleFavorite { drink, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Flips the favorites-only filter and returns the new value.
    pub async fn toggle_favorites_only(&self) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ToggleFavoritesOnly { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Current display list under the active filter.
    pub async fn display_results(&self) -> Result<Vec<Drink>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DisplayResults { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Cloned snapshot of the full session state.
    pub async fn state(&self) -> Result<SessionView, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::State { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// True when `id` is currently a favorite.
    pub async fn is_favorite(&self, id: impl Into<String>) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::IsFavorite {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Records a scroll offset; written to the session store after the
    /// scroll quiet window.
    pub async fn save_scroll(&self, offset: u32) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(Command::SaveScroll { offset })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Reads the saved scroll offset, if any.
    pub async fn restore_scroll(&self) -> Result<Option<u32>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RestoreScroll { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the session loop, flushing any pending scroll write and
    /// releasing the sync channel.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

fn flush_scroll(scroll_pending: &mut Option<u32>, session_kv: Option<&mut (dyn KvStore + '_)>) {
    if let (Some(offset), Some(kv)) = (scroll_pending.take(), session_kv) {
        if let Err(err) = persist::save_scroll(kv, offset) {
            warn!(?err, "scroll marker write failed");
        }
    }
}
