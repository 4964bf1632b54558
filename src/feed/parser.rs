use chrono::SecondsFormat;
use feed_rs::model::{Entry, Link};
use feed_rs::parser;

use crate::error::{AppError, Result};
use crate::models::PaperRecord;

const HTML_LINK_TYPE: &str = "text/html";
/// Name feed-rs gives an `<author>` that has no `<name>` child.
const PLACEHOLDER_AUTHOR: &str = "unknown";

/// Parse an Atom payload into paper records, one per entry, in document order.
///
/// Fails as a whole when the payload is malformed or an entry lacks a title,
/// summary, publication date, usable id or author name. Entries without a
/// category fall back to `default_category`.
pub fn parse_papers(xml: &str, default_category: &str) -> Result<Vec<PaperRecord>> {
    // feed-rs invents a UUID for entries without <id>; keep those empty instead
    let feed = parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
        .parse(xml.as_bytes())?;

    feed.entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| paper_from_entry(index, entry, default_category))
        .collect()
}

fn paper_from_entry(index: usize, entry: Entry, default_category: &str) -> Result<PaperRecord> {
    let missing = |element| AppError::MissingElement {
        entry: index,
        element,
    };

    let paper_id = paper_id_from_uri(&entry.id)
        .ok_or_else(|| missing("id"))?
        .to_string();
    let title = entry
        .title
        .map(|t| normalize_whitespace(&t.content))
        .ok_or_else(|| missing("title"))?;
    let summary = entry
        .summary
        .map(|s| normalize_whitespace(&s.content))
        .ok_or_else(|| missing("summary"))?;
    let published = entry
        .published
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .ok_or_else(|| missing("published"))?;

    let authors = entry
        .authors
        .into_iter()
        .map(|person| {
            let name = person.name.trim();
            if name.is_empty() || name == PLACEHOLDER_AUTHOR {
                return Err(missing("author name"));
            }
            Ok(name.to_string())
        })
        .collect::<Result<Vec<_>>>()?;

    let category = entry
        .categories
        .into_iter()
        .map(|c| c.term)
        .find(|term| !term.is_empty())
        .unwrap_or_else(|| default_category.to_string());

    Ok(PaperRecord {
        paper_id,
        title,
        summary,
        authors,
        published,
        link: html_link(&entry.links),
        category,
    })
}

/// Last non-empty path segment of an entry id such as `http://arxiv.org/abs/2401.00001v1`.
fn paper_id_from_uri(uri: &str) -> Option<&str> {
    uri.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

fn html_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|link| link.media_type.as_deref() == Some(HTML_LINK_TYPE))
        .map(|link| link.href.clone())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
