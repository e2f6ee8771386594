//! Archive listings: document categories and recently added documents.

use serde::{Deserialize, Serialize};

use crate::catalog::Classification;

/// One browsable category of archive documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveCategory {
    /// Stable slug identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description of the holdings.
    pub description: String,
    /// Number of documents in the category.
    pub files: u32,
    /// Classification of the holdings as a whole.
    pub status: Classification,
    /// Covered date range, e.g. `1947-2024`.
    pub date_range: String,
}

impl ArchiveCategory {
    /// Case-insensitive substring match over title and description.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }
}

/// One recently added archive document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentDocument {
    /// File name as listed in the reading room.
    pub name: String,
    /// Publication date.
    pub date: String,
    /// Page count.
    pub pages: u32,
    /// Classification tag.
    pub classification: Classification,
}
