//! In-memory session state and derived views.

/// Authoritative session store and state patch types.
pub mod store;
