//! Casevault — Session & Progress bounded context.
//!
//! Responsible for per-session progress (completed cases, unlock gating),
//! the explicit session object tying progress to one playback controller,
//! and the in-memory session registry.

pub mod progress;
pub mod registry;
pub mod session;
