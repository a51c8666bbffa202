//! Single-writer async session runtime: dispatcher loop, handle, events.

/// Event stream types emitted by the session runtime.
pub mod events;
/// Handle and dispatcher loop implementation.
pub mod handle;
