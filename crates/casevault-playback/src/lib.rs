//! Casevault — Playback bounded context.
//!
//! Responsible for walking one case's scene graph in response to reader
//! choices and for the timed character-by-character reveal of each node's
//! text.

pub mod controller;
pub mod reveal;
