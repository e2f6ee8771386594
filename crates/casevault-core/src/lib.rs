//! Casevault Core — shared domain abstractions.
//!
//! This crate defines the identifier types, the error taxonomy, and the
//! clock seam that all other crates depend on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod ids;
