use crate::models::CommentAnalysis;

/// Removes noise from a comment listing before it is displayed.
///
/// A comment is noise if its author contains one of the author markers
/// (compared case-insensitively), or if its body is exactly one of the removed
/// bodies. Retained comments keep their relative order.
#[derive(Clone, Debug)]
pub struct CommentFilter {
    author_markers: Vec<String>,
    removed_bodies: Vec<String>,
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self::empty()
            .author_marker("mod")
            .author_marker("bot")
            .removed_body("[deleted]")
            .removed_body("[removed]")
    }
}

impl CommentFilter {
    /// The default filter, dropping moderators, bots and deleted comments.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter that keeps everything.
    pub fn empty() -> Self {
        Self {
            author_markers: Vec::new(),
            removed_bodies: Vec::new(),
        }
    }

    #[must_use]
    pub fn author_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.author_markers.push(marker.into().to_lowercase());
        self
    }

    #[must_use]
    pub fn removed_body<S: Into<String>>(mut self, body: S) -> Self {
        self.removed_bodies.push(body.into());
        self
    }

    pub fn is_noise(&self, comment: &CommentAnalysis) -> bool {
        let author = comment.author.to_lowercase();
        self.author_markers.iter().any(|marker| author.contains(marker.as_str()))
            || self.removed_bodies.iter().any(|body| *body == comment.body)
    }

    pub fn apply(&self, mut comments: Vec<CommentAnalysis>) -> Vec<CommentAnalysis> {
        comments.retain(|comment| !self.is_noise(comment));
        comments
    }
}

/// Applies the default [`CommentFilter`].
pub fn filter(comments: Vec<CommentAnalysis>) -> Vec<CommentAnalysis> {
    CommentFilter::default().apply(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn comment(id: &str, author: &str, body: &str) -> CommentAnalysis {
        CommentAnalysis {
            id: id.to_owned(),
            body: body.to_owned(),
            sentiment: 0.0,
            score: 1,
            author: author.to_owned(),
            created_utc: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn ids(comments: &[CommentAnalysis]) -> Vec<&str> {
        comments.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_drops_noise_and_keeps_order() {
        let comments = vec![
            comment("a", "trader42", "calls"),
            comment("b", "AutoModerator", "Please read the rules"),
            comment("c", "bagholder", "puts"),
            comment("d", "someone", "[deleted]"),
            comment("e", "diamondhands", "hold"),
        ];

        assert_eq!(ids(&filter(comments)), ["a", "c", "e"]);
    }

    #[test]
    fn test_author_markers_are_case_insensitive_substrings() {
        let filter = CommentFilter::default();
        assert!(filter.is_noise(&comment("a", "ModBot", "hi")));
        assert!(filter.is_noise(&comment("b", "RemindMeBOT", "hi")));
        // "mod" hiding inside an ordinary name still counts.
        assert!(filter.is_noise(&comment("c", "commodity_trader", "hi")));
        assert!(!filter.is_noise(&comment("d", "trader42", "hi")));
    }

    #[test]
    fn test_removed_bodies_must_match_exactly() {
        let filter = CommentFilter::default();
        assert!(filter.is_noise(&comment("a", "x", "[removed]")));
        assert!(!filter.is_noise(&comment("b", "x", "[deleted] lol")));
        assert!(!filter.is_noise(&comment("c", "x", "[DELETED]")));
        assert!(!filter.is_noise(&comment("d", "x", " [removed]")));
    }

    #[test]
    fn test_custom_filter() {
        let filter = CommentFilter::empty().author_marker("Spam");
        let comments = vec![
            comment("a", "AutoModerator", "[deleted]"),
            comment("b", "spammer", "buy now"),
        ];

        assert_eq!(ids(&filter.apply(comments)), ["a"]);
    }
}
