//! Shared fixtures for unit tests: canned Atom payloads and a throwaway HTTP
//! server standing in for the arXiv endpoint.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <id>http://arxiv.org/api/query</id>
  <title type="html">ArXiv Query: search_query=cat:cs.AI</title>
  <updated>2024-01-04T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.00003v1</id>
    <updated>2024-01-03T18:59:59Z</updated>
    <published>2024-01-03T18:59:59Z</published>
    <title>Scaling Transformer Agents
      for Planning</title>
    <summary>  We study transformer-based agents.
Results improve planning.
</summary>
    <author>
      <name>Ada Lovelace</name>
    </author>
    <author>
      <name>Alan Turing</name>
    </author>
    <link href="http://arxiv.org/abs/2401.00003v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00003v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v2</id>
    <updated>2024-01-02T10:00:00Z</updated>
    <published>2024-01-02T10:00:00Z</published>
    <title>Multilingual Retrieval</title>
    <summary>Dense retrieval across forty languages.</summary>
    <author>
      <name>Grace Hopper</name>
    </author>
    <link href="http://arxiv.org/abs/2401.00002v2" rel="alternate" type="text/html"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <updated>2024-01-01T08:30:00Z</updated>
    <published>2024-01-01T08:30:00Z</published>
    <title>Symbolic Search Heuristics</title>
    <summary>Classical planning with learned heuristics.</summary>
    <author>
      <name>Edsger Dijkstra</name>
    </author>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00001v1" rel="related" type="application/pdf"/>
  </entry>
</feed>
"#;

/// A minimal entry without links or categories.
pub fn atom_entry(paper_id: &str, title: &str, summary: &str) -> String {
    format!(
        r#"<entry>
    <id>http://arxiv.org/abs/{paper_id}</id>
    <published>2024-01-01T00:00:00Z</published>
    <title>{title}</title>
    <summary>{summary}</summary>
    <author><name>Test Author</name></author>
  </entry>"#
    )
}

pub fn atom_feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>http://arxiv.org/api/query</id>
  <title>test feed</title>
  <updated>2024-01-01T00:00:00Z</updated>
  {}
</feed>
"#,
        entries.join("\n  ")
    )
}

/// Serve `body` with `status` on every GET and return the endpoint URL.
pub async fn serve(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/api/query", get(move || async move { (status, body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/query")
}

/// An endpoint on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/query")
}
