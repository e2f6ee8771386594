//! Case pack loading: YAML parsing, validation, and fingerprinting.
//!
//! A pack couples the site branding record, the case catalog with per-case
//! scene graphs, and the archive listings. Validation happens entirely at
//! load time; a pack that loads is safe to play.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use casevault_core::error::DomainError;
use casevault_core::ids::CaseId;

use crate::archive::{ArchiveCategory, RecentDocument};
use crate::catalog::CaseEntry;
use crate::scene::{SceneGraph, SceneGraphDef};

const DEFAULT_PACK: &str = include_str!("../assets/default_pack.yaml");

/// Branding record driving the single parameterized view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Brand name shown in the header.
    pub brand: String,
    /// Sub-brand line under the name.
    pub division: String,
    /// Tagline shown in the footer.
    pub tagline: String,
    /// Whether the view should offer the ambient-audio toggle.
    #[serde(default)]
    pub audio_enabled: bool,
}

/// Raw per-case definition as it appears in pack YAML.
#[derive(Debug, Deserialize)]
struct CaseDef {
    #[serde(flatten)]
    entry: CaseEntry,
    #[serde(default)]
    scenes: Option<SceneGraphDef>,
}

/// Raw pack definition.
#[derive(Debug, Deserialize)]
struct PackDef {
    site: SiteConfig,
    cases: Vec<CaseDef>,
    #[serde(default)]
    categories: Vec<ArchiveCategory>,
    #[serde(default)]
    recent_documents: Vec<RecentDocument>,
}

/// One validated case: catalog entry plus its scene graph, when it has one.
///
/// The unlock mechanism is generic over any number of cases; whether a case
/// is actually playable is decided by the data.
#[derive(Debug)]
pub struct Case {
    /// Catalog metadata.
    pub entry: CaseEntry,
    graph: Option<Arc<SceneGraph>>,
}

impl Case {
    /// Whether this case has playable scenes.
    #[must_use]
    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    /// The case's scene graph.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` for a metadata-only case.
    pub fn graph(&self) -> Result<Arc<SceneGraph>, DomainError> {
        self.graph.clone().ok_or_else(|| {
            DomainError::Content(format!("case {} has no scene graph", self.entry.id))
        })
    }
}

/// A fully validated case pack.
#[derive(Debug)]
pub struct CasePack {
    site: SiteConfig,
    cases: Vec<Case>,
    categories: Vec<ArchiveCategory>,
    recent_documents: Vec<RecentDocument>,
    digest: String,
}

impl CasePack {
    /// Parses and validates a pack from YAML source.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` for parse failures or non-contiguous
    /// case ids, and `DomainError::InvalidGraph` if any case's scene graph
    /// fails validation.
    pub fn from_yaml(source: &str) -> Result<Self, DomainError> {
        let def: PackDef = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Content(format!("case pack parse failed: {e}")))?;

        let digest = format!("{:x}", Sha256::digest(source.as_bytes()));

        let mut cases = Vec::with_capacity(def.cases.len());
        for (i, case_def) in def.cases.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let expected = CaseId(i as u32 + 1);
            if case_def.entry.id != expected {
                return Err(DomainError::Content(format!(
                    "case ids must be contiguous from 1: found {} at position {}",
                    case_def.entry.id, expected
                )));
            }
            let graph = case_def.scenes.map(SceneGraphDef::build).transpose()?;
            cases.push(Case {
                entry: case_def.entry,
                graph: graph.map(Arc::new),
            });
        }

        info!(
            cases = cases.len(),
            categories = def.categories.len(),
            digest = %&digest[..12],
            "case pack loaded"
        );

        Ok(Self {
            site: def.site,
            cases,
            categories: def.categories,
            recent_documents: def.recent_documents,
            digest,
        })
    }

    /// Loads the embedded default pack.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the embedded pack fails validation, which
    /// is a build defect and should abort startup.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_yaml(DEFAULT_PACK)
    }

    /// Site branding record.
    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// SHA-256 fingerprint of the pack source.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// All cases in catalog order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases in the pack.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Looks up a case by ordinal id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCase` for an id outside the catalog.
    pub fn case(&self, id: CaseId) -> Result<&Case, DomainError> {
        id.0.checked_sub(1)
            .and_then(|i| self.cases.get(i as usize))
            .ok_or(DomainError::UnknownCase(id))
    }

    /// Archive categories, optionally filtered by a search query.
    #[must_use]
    pub fn search_categories(&self, query: Option<&str>) -> Vec<&ArchiveCategory> {
        match query {
            Some(q) if !q.trim().is_empty() => self
                .categories
                .iter()
                .filter(|c| c.matches(q.trim()))
                .collect(),
            _ => self.categories.iter().collect(),
        }
    }

    /// Recently added documents.
    #[must_use]
    pub fn recent_documents(&self) -> &[RecentDocument] {
        &self.recent_documents
    }
}
