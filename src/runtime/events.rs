//! Session event stream payloads.

/// Events emitted from the single-writer session loop.
///
/// Views subscribe to these instead of polling state: re-renders hang off
/// `ResultsUpdated`/`FavoritesChanged`, and the one-shot error focus move
/// hangs off `ErrorAnnounced`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A search was forwarded past the debounce/dedupe gates.
    SearchStarted {
        /// Trimmed term that was dispatched.
        term: String,
    },
    /// The latest search settled successfully.
    ResultsUpdated {
        /// Number of results now held.
        count: usize,
    },
    /// The latest search settled with a failure.
    SearchFailed {
        /// User-facing error message.
        message: String,
    },
    /// A new distinct error value appeared; fired at most once per value.
    ErrorAnnounced {
        /// Error message to announce.
        message: String,
    },
    /// This instance toggled a favorite.
    FavoritesChanged {
        /// New favorites count.
        count: usize,
    },
    /// Favorites were replaced from a peer instance.
    FavoritesSynced {
        /// New favorites count.
        count: usize,
    },
    /// Search state was replaced from a peer instance.
    SearchStateSynced {
        /// Term of the peer's settled search.
        term: String,
    },
}
