use serde::Serialize;

use crate::models::PaperRecord;

/// Case-insensitive search and category predicates. Empty strings match everything.
#[derive(Debug, Clone, Default)]
pub struct PaperFilter {
    search: Option<String>,
    category: Option<String>,
}

impl PaperFilter {
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: normalize_term(search),
            category: normalize_term(category),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn matches(&self, paper: &PaperRecord) -> bool {
        self.matches_search(paper) && self.matches_category(paper)
    }

    fn matches_search(&self, paper: &PaperRecord) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        paper.paper_id.to_lowercase().contains(term)
            || paper.summary.to_lowercase().contains(term)
            || paper.authors_display().to_lowercase().contains(term)
    }

    fn matches_category(&self, paper: &PaperRecord) -> bool {
        match &self.category {
            Some(filter) => paper.category.to_lowercase().contains(filter),
            None => true,
        }
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.is_empty()).map(str::to_lowercase)
}

/// One page window of filtered results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Filter `papers` and cut out the 1-based `page`. Page 0 is treated as page 1;
/// pages past the end come back empty.
pub fn filter_and_paginate(
    papers: Vec<PaperRecord>,
    filter: &PaperFilter,
    page: usize,
    page_size: usize,
) -> Page<PaperRecord> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let matches: Vec<PaperRecord> = papers.into_iter().filter(|p| filter.matches(p)).collect();
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items = matches.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_matches,
    }
}
