use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A 1-5 star rating attached to feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(AppError::Validation(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0 as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub paper_id: String,
    pub user_name: Option<String>,
    pub comment_text: Option<String>,
    pub rating: Option<Rating>,
    pub timestamp: DateTime<Utc>,
}

/// Feedback as submitted; rating is kept raw so the store can reject it.
#[derive(Debug, Clone, Default)]
pub struct NewFeedback {
    pub paper_id: String,
    pub user_name: Option<String>,
    pub comment_text: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub user_name: Option<String>,
    pub paper_id: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub user_name: Option<String>,
    pub paper_id: String,
}

/// Exact-match filters for listing bookmarks. Unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkFilter {
    pub user_name: Option<String>,
    pub paper_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(Rating::try_from(value).unwrap().get() as i64, value);
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        for value in [-1, 0, 6, 100] {
            let err = Rating::try_from(value).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn rating_deserializes_through_range_check() {
        let ok: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(ok.get(), 4);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
