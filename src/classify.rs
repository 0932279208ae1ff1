use serde::Serialize;

/// Sentiments within this distance of zero count as neutral.
pub const NEUTRAL_BAND: f64 = 0.1;

/// How a comment is presented, derived from its sentiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Positive,
    Negative,
    Neutral,
}

/// Maps a sentiment in `[-1, 1]` to a display [`Bucket`].
///
/// Both band edges belong to [`Bucket::Neutral`]. The input isn't range
/// checked; `NaN` ends up neutral.
pub fn classify(sentiment: f64) -> Bucket {
    if sentiment > NEUTRAL_BAND {
        Bucket::Positive
    } else if sentiment < -NEUTRAL_BAND {
        Bucket::Negative
    } else {
        Bucket::Neutral
    }
}
