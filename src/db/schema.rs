/// Append-only annotation tables. Safe to run on every start.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    paper_id TEXT NOT NULL,
    user_name TEXT,
    comment_text TEXT,
    rating INTEGER CHECK (rating >= 1 AND rating <= 5),
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_feedback_paper_id ON feedback(paper_id);

CREATE TABLE IF NOT EXISTS bookmarks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT,
    paper_id TEXT NOT NULL,
    saved_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_user_name ON bookmarks(user_name);
"#;
