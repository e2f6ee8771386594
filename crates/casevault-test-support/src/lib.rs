//! Shared test doubles and fixtures for the Casevault engine.

mod clock;
mod content;
mod unlock;

pub use clock::{FixedClock, fixed_clock};
pub use content::mini_pack;
pub use unlock::RecordingUnlockSink;
