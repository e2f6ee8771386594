//! Casevault — Content bounded context.
//!
//! Responsible for the case catalog, per-case scene graphs (with
//! construction-time validation), the document archive listings, and
//! loading/fingerprinting YAML case packs.

pub mod archive;
pub mod catalog;
pub mod pack;
pub mod scene;
