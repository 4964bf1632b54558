mod annotation;
mod paper;

pub use annotation::{Bookmark, BookmarkFilter, Feedback, NewBookmark, NewFeedback, Rating};
pub use paper::PaperRecord;
