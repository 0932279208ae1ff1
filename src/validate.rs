use crate::error::{Error, Result};
use std::fmt;

/// The substring a post reference must contain to be submitted.
pub const PLATFORM_DOMAIN: &str = "reddit.com";

/// A post reference that passed [`validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostReference(String);

impl PostReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that `raw` plausibly refers to a reddit post.
///
/// This is plain substring containment, not URL parsing: anything mentioning
/// the platform domain is accepted as-is, and anything else is rejected with
/// [`Error::Validation`].
pub fn validate(raw: &str) -> Result<PostReference> {
    if raw.contains(PLATFORM_DOMAIN) {
        Ok(PostReference(raw.to_owned()))
    } else {
        Err(Error::Validation)
    }
}
