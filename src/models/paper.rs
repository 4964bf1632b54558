use serde::{Deserialize, Serialize};

/// One paper as published by the upstream Atom feed.
///
/// Built fresh on every fetch and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub paper_id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: String,
    pub link: Option<String>,
    pub category: String,
}

impl PaperRecord {
    /// Author names in feed order, joined for display.
    pub fn authors_display(&self) -> String {
        self.authors.join(", ")
    }
}
