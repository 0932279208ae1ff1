//! The data model returned by the analysis backend.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single analyzed reddit post together with its top-level comments.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PostAnalysis {
    /// A unique ID identifying the post.
    pub id: String,

    pub title: String,

    /// The text of this post, empty for link posts.
    #[serde(default)]
    pub selftext: String,

    /// Aggregate sentiment of title and text, in `[-1, 1]`.
    pub sentiment: f64,

    /// Net vote count.
    pub score: i64,

    /// URL of the linked content.
    pub url: String,

    /// Comment count as reported by reddit, not the length of `top_comments`.
    pub num_comments: i64,

    #[serde(with = "timestamp")]
    pub created_utc: DateTime<Utc>,

    /// Comments in the order the backend ranked them.
    pub top_comments: Vec<CommentAnalysis>,
}

/// A single analyzed comment on a [`PostAnalysis`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CommentAnalysis {
    pub id: String,
    pub body: String,

    /// Sentiment of the body, in `[-1, 1]`.
    pub sentiment: f64,
    pub score: i64,
    pub author: String,

    #[serde(with = "timestamp")]
    pub created_utc: DateTime<Utc>,
}

/// Unix timestamps in seconds. Reddit hands these out as floats, so both
/// integers and floats are accepted and fractional seconds are dropped.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(date.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(SecondsVisitor)
    }

    struct SecondsVisitor;

    impl SecondsVisitor {
        fn from_secs<E: de::Error>(secs: i64) -> Result<DateTime<Utc>, E> {
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| E::custom(format!("timestamp out of range: {}", secs)))
        }
    }

    impl<'de> Visitor<'de> for SecondsVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a unix timestamp in seconds")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Self::from_secs(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            let secs = i64::try_from(value)
                .map_err(|_| E::custom(format!("timestamp out of range: {}", value)))?;
            Self::from_secs(secs)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if !value.is_finite() {
                return Err(E::custom("timestamp is not a finite number"));
            }
            Self::from_secs(value.trunc() as i64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_analysis_from_backend_json() {
        let post: PostAnalysis = serde_json::from_value(json!({
            "id": "1abcde",
            "title": "GME to the moon",
            "selftext": "",
            "sentiment": 0.4215,
            "score": -3,
            "url": "https://www.reddit.com/r/wallstreetbets/comments/1abcde/",
            "num_comments": 1200,
            "created_utc": 1_700_000_000.75,
            "top_comments": [
                {
                    "id": "c1",
                    "body": "buy the dip",
                    "sentiment": 0.0,
                    "score": 12,
                    "author": "trader42",
                    "created_utc": 1_700_000_100
                }
            ]
        }))
        .unwrap();

        assert_eq!(post.score, -3);
        assert_eq!(post.num_comments, 1200);
        assert_eq!(post.created_utc.timestamp(), 1_700_000_000);
        assert_eq!(post.top_comments.len(), 1);
        assert_eq!(post.top_comments[0].created_utc.timestamp(), 1_700_000_100);
    }

    #[test]
    fn test_missing_selftext_defaults_to_empty() {
        let post: PostAnalysis = serde_json::from_value(json!({
            "id": "x",
            "title": "t",
            "sentiment": 0.0,
            "score": 0,
            "url": "https://reddit.com/x",
            "num_comments": 0,
            "created_utc": 0,
            "top_comments": []
        }))
        .unwrap();

        assert!(post.selftext.is_empty());
    }

    #[test]
    fn test_timestamp_rejects_strings() {
        let result = serde_json::from_value::<CommentAnalysis>(json!({
            "id": "c1",
            "body": "b",
            "sentiment": 0.1,
            "score": 1,
            "author": "a",
            "created_utc": "yesterday"
        }));

        assert!(result.is_err());
    }
}
