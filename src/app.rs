use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::db::{group_by_paper, AnnotationStore};
use crate::error::{AppError, Result};
use crate::feed::{parse_papers, FeedClient};
use crate::listing::{filter_and_paginate, PaperFilter};
use crate::models::{Bookmark, BookmarkFilter, Feedback, NewBookmark, NewFeedback, PaperRecord};

/// Listing request as it arrives from the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaperView {
    #[serde(flatten)]
    pub paper: PaperRecord,
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub papers: Vec<PaperView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub search: String,
    pub category: String,
}

pub struct App {
    feed: FeedClient,
    store: AnnotationStore,
    page_size: usize,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let feed = FeedClient::new(config.feed.clone())?;
        let store = AnnotationStore::open(config.database_path.clone()).await?;
        Ok(Self::with_parts(feed, store, config.server.page_size))
    }

    pub fn with_parts(feed: FeedClient, store: AnnotationStore, page_size: usize) -> Self {
        Self {
            feed,
            store,
            page_size,
        }
    }

    /// Fetch and parse the live feed. `limit` overrides the configured result count.
    pub async fn fetch_papers(&self, limit: Option<u32>) -> Result<Vec<PaperRecord>> {
        let xml = self.feed.fetch_raw(limit).await?;
        let papers = parse_papers(&xml, &self.feed.config().category)?;
        tracing::debug!(count = papers.len(), "Parsed feed entries");
        Ok(papers)
    }

    /// One page of the live feed with each paper's stored feedback attached.
    pub async fn dashboard(&self, query: &ListingQuery) -> Result<DashboardPage> {
        let papers = self.fetch_papers(None).await?;
        let filter = PaperFilter::new(query.search.as_deref(), query.category.as_deref());
        let page = filter_and_paginate(papers, &filter, query.page, self.page_size);

        let mut feedback = group_by_paper(self.store.list_feedback().await?);
        let papers = page
            .items
            .into_iter()
            .map(|paper| PaperView {
                feedback: feedback.remove(&paper.paper_id).unwrap_or_default(),
                paper,
            })
            .collect();

        Ok(DashboardPage {
            papers,
            page: page.page,
            total_pages: page.total_pages,
            total_matches: page.total_matches,
            search: filter.search().unwrap_or_default().to_string(),
            category: filter.category().unwrap_or_default().to_string(),
        })
    }

    pub async fn submit_feedback(&self, feedback: NewFeedback) -> Result<i64> {
        require_paper_id(&feedback.paper_id)?;
        let id = self.store.append_feedback(feedback).await?;
        tracing::info!(id, "Stored feedback");
        Ok(id)
    }

    pub async fn feedback_by_paper(&self) -> Result<BTreeMap<String, Vec<Feedback>>> {
        Ok(group_by_paper(self.store.list_feedback().await?))
    }

    pub async fn bookmark(&self, bookmark: NewBookmark) -> Result<i64> {
        require_paper_id(&bookmark.paper_id)?;
        let id = self.store.append_bookmark(bookmark).await?;
        tracing::info!(id, "Stored bookmark");
        Ok(id)
    }

    pub async fn bookmarks(&self, filter: BookmarkFilter) -> Result<Vec<Bookmark>> {
        self.store.list_bookmarks(filter).await
    }
}

fn require_paper_id(paper_id: &str) -> Result<()> {
    if paper_id.trim().is_empty() {
        return Err(AppError::Validation("paper_id is required".to_string()));
    }
    Ok(())
}
