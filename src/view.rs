//! What the controller hands to whoever draws the result.
use crate::classify::{classify, Bucket};
use crate::filter::CommentFilter;
use crate::models::{CommentAnalysis, PostAnalysis};

/// The lifecycle of one analysis, as seen by a renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Success(AnalysisView),
    Failure(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        match self {
            ViewState::Success(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// A [`PostAnalysis`] whose comments have been through a [`CommentFilter`].
///
/// `num_comments` is left as reported, so it can exceed the number of
/// comments shown.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisView {
    post: PostAnalysis,
    hidden: usize,
}

/// A retained comment together with its display bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedComment<'a> {
    pub comment: &'a CommentAnalysis,
    pub bucket: Bucket,
}

/// Bucket counts over the displayed comments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Mean comment sentiment, `None` when nothing is displayed.
    pub mean_sentiment: Option<f64>,
}

impl AnalysisView {
    pub fn new(mut post: PostAnalysis, filter: &CommentFilter) -> Self {
        let total = post.top_comments.len();
        post.top_comments = filter.apply(post.top_comments);
        let hidden = total - post.top_comments.len();
        Self { post, hidden }
    }

    pub fn post(&self) -> &PostAnalysis {
        &self.post
    }

    pub fn post_bucket(&self) -> Bucket {
        classify(self.post.sentiment)
    }

    /// The retained comments in backend order.
    pub fn comments(&self) -> impl Iterator<Item = ClassifiedComment<'_>> + '_ {
        self.post.top_comments.iter().map(|comment| ClassifiedComment {
            comment,
            bucket: classify(comment.sentiment),
        })
    }

    /// How many of the returned comments the filter dropped.
    pub fn hidden_comments(&self) -> usize {
        self.hidden
    }

    pub fn summary(&self) -> SentimentSummary {
        let mut summary = SentimentSummary::default();
        let mut total = 0.0;

        for classified in self.comments() {
            total += classified.comment.sentiment;
            match classified.bucket {
                Bucket::Positive => summary.positive += 1,
                Bucket::Negative => summary.negative += 1,
                Bucket::Neutral => summary.neutral += 1,
            }
        }

        let shown = self.post.top_comments.len();
        if shown > 0 {
            summary.mean_sentiment = Some(total / shown as f64);
        }
        summary
    }
}

impl From<PostAnalysis> for AnalysisView {
    fn from(post: PostAnalysis) -> Self {
        Self::new(post, &CommentFilter::default())
    }
}
