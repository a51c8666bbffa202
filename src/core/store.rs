//! Authoritative session store: search results, favorites, and view state.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{drink::Drink, types::DrinkId};

/// Durable record of the last successful search, for reload continuity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Term of the search that produced `results`.
    pub term: String,
    /// Result set as settled.
    pub results: Vec<Drink>,
}

/// Cloned copy of the full session state for cross-task readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Current result set, provider response order.
    pub results: Vec<Drink>,
    /// Current favorites, insertion order.
    pub favorites: Vec<Drink>,
    /// True while a dispatched search has not settled.
    pub is_loading: bool,
    /// Last user-facing error, cleared on successful settle.
    pub last_error: Option<String>,
    /// Term of the most recently started search.
    pub last_search_term: String,
    /// Favorites-only view filter.
    pub show_favorites_only: bool,
}

/// Sparse state patch where each `Some` field overwrites the store value.
///
/// Used for bulk restoration (session snapshot, cross-tab search state).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionPatch {
    /// Optional replacement for the result set.
    pub results: Option<Vec<Drink>>,
    /// Optional replacement for the favorites list.
    pub favorites: Option<Vec<Drink>>,
    /// Optional replacement for the loading flag.
    pub is_loading: Option<bool>,
    /// Optional replacement for the error slot; `Some(None)` clears it.
    pub last_error: Option<Option<String>>,
    /// Optional replacement for the last search term.
    pub last_search_term: Option<String>,
    /// Optional replacement for the favorites-only filter.
    pub show_favorites_only: Option<bool>,
}

/// Single source of truth for the search session.
///
/// All mutation goes through the methods below; each call is one atomic
/// state transition. Favorites are kept in insertion order with uniqueness
/// by id enforced here, not by the container.
#[derive(Debug, Default)]
pub struct SessionStore {
    results: Vec<Drink>,
    favorites: Vec<Drink>,
    fav_ids: HashSet<DrinkId>,
    is_loading: bool,
    last_error: Option<String>,
    last_search_term: String,
    show_favorites_only: bool,
}

impl SessionStore {
    /// Creates a store with empty defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result set; `None` is the provider's not-found sentinel.
    ///
    /// Always clears the loading flag and the last error.
    pub fn set_results(&mut self, results: Option<Vec<Drink>>) {
        self.results = results.unwrap_or_default();
        self.is_loading = false;
        self.last_error = None;
    }

    /// Marks a search as in flight and records its term.
    ///
    /// Stale results stay visible while loading, until settle. Any error
    /// left by a previous search is cleared.
    pub fn start_loading(&mut self, term: impl Into<String>) {
        self.is_loading = true;
        self.last_search_term = term.into();
        self.last_error = None;
    }

    /// Records a terminal failure for the in-flight search.
    ///
    /// Leaves `results` untouched.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.last_error = Some(message.into());
    }

    /// Adds or removes `drink` from favorites as one read-then-write step.
    ///
    /// Returns the new favorites list so the caller can persist and
    /// broadcast it.
    pub fn toggle_favorite(&mut self, drink: Drink) -> Vec<Drink> {
        if self.fav_ids.remove(&drink.id) {
            self.favorites.retain(|fav| fav.id != drink.id);
        } else {
            self.fav_ids.insert(drink.id.clone());
            self.favorites.push(drink);
        }
        self.favorites.clone()
    }

    /// Replaces favorites verbatim from an inbound cross-tab update.
    ///
    /// Never writes the ledger and never rebroadcasts; the sender already
    /// persisted. This asymmetry with [`SessionStore::toggle_favorite`] is
    /// what prevents broadcast loops.
    pub fn sync_favorites(&mut self, favorites: Vec<Drink>) {
        self.fav_ids = favorites.iter().map(|fav| fav.id.clone()).collect();
        self.favorites = favorites;
    }

    /// Flips the favorites-only view filter and returns the new value.
    pub fn toggle_show_favorites_only(&mut self) -> bool {
        self.show_favorites_only = !self.show_favorites_only;
        self.show_favorites_only
    }

    /// Applies a shallow merge of all `Some` fields in `patch`.
    pub fn apply_patch(&mut self, patch: SessionPatch) {
        if let Some(results) = patch.results {
            self.results = results;
        }
        if let Some(favorites) = patch.favorites {
            self.sync_favorites(favorites);
        }
        if let Some(is_loading) = patch.is_loading {
            self.is_loading = is_loading;
        }
        if let Some(last_error) = patch.last_error {
            self.last_error = last_error;
        }
        if let Some(term) = patch.last_search_term {
            self.last_search_term = term;
        }
        if let Some(flag) = patch.show_favorites_only {
            self.show_favorites_only = flag;
        }
    }

    /// Exports the persistable part of the session.
    pub fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            term: self.last_search_term.clone(),
            results: self.results.clone(),
        }
    }

    /// Restores term and results from a snapshot, leaving the rest untouched.
    pub fn restore_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.apply_patch(SessionPatch {
            results: Some(snapshot.results),
            last_search_term: Some(snapshot.term),
            ..SessionPatch::default()
        });
    }

    /// Current result set in provider response order.
    pub fn results(&self) -> &[Drink] {
        &self.results
    }

    /// Current favorites in insertion order.
    pub fn favorites(&self) -> &[Drink] {
        &self.favorites
    }

    /// True while a dispatched search has not settled.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last user-facing error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Term of the most recently started search.
    pub fn last_search_term(&self) -> &str {
        &self.last_search_term
    }

    /// Favorites-only view filter.
    pub fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    /// True when `id` is currently a favorite.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.fav_ids.contains(id)
    }

    /// True when at least one favorite exists.
    pub fn has_favorites(&self) -> bool {
        !self.favorites.is_empty()
    }

    /// The list to display: under the favorites-only filter, results are
    /// narrowed to those that are favorites, keeping the view consistent
    /// with the active search context.
    pub fn display_results(&self) -> Vec<&Drink> {
        if self.show_favorites_only {
            self.results
                .iter()
                .filter(|drink| self.fav_ids.contains(&drink.id))
                .collect()
        } else {
            self.results.iter().collect()
        }
    }

    /// Owned variant of [`SessionStore::display_results`].
    pub fn display_results_cloned(&self) -> Vec<Drink> {
        self.display_results().into_iter().cloned().collect()
    }

    /// Clones the full state for cross-task readers.
    pub fn view(&self) -> SessionView {
        SessionView {
            results: self.results.clone(),
            favorites: self.favorites.clone(),
            is_loading: self.is_loading,
            last_error: self.last_error.clone(),
            last_search_term: self.last_search_term.clone(),
            show_favorites_only: self.show_favorites_only,
        }
    }
}
