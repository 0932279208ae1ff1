use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::PostAnalysis;
use crate::validate::PostReference;
use governor::{Quota, RateLimiter};
use reqwest::{IntoUrl, Url};
use serde::Serialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};

type AnalysisRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// An asynchronous `Client` for the post sentiment analysis backend.
///
/// This client is built on top of a [`reqwest::Client`], so as per that documentation
/// it is advised you create a single one and **reuse** it. Clones share both the
/// connection pool and the rate limiter.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    endpoint: Url,
    limiter: Arc<AnalysisRateLimiter>,
}

impl Client {
    /// Creates a new client from the given [`Config`].
    ///
    /// # Example
    /// ```rust
    /// use postmood::{Client, Config};
    ///
    /// let client = Client::new(Config::new().api_base("http://localhost:8000")).unwrap();
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::with_client(client, config)
    }

    /// Creates a new client with the given backing [`reqwest::Client`].
    ///
    /// The user agent in `config` is ignored; configure it on `client` instead.
    pub fn with_client(client: reqwest::Client, config: Config) -> Result<Self> {
        let endpoint = endpoint(config.api_base.as_str())?;
        let rpm = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rpm)));

        Ok(Self {
            client,
            endpoint,
            limiter,
        })
    }

    /// Fetches the analysis of `post`, covering at most `max_comments` top-level comments.
    ///
    /// `max_comments` is forwarded as-is; the backend rejects values outside `1..=500`.
    #[instrument(skip(self, post), fields(post = %post))]
    pub async fn analyze(&self, post: &PostReference, max_comments: u32) -> Result<PostAnalysis> {
        #[derive(Serialize)]
        struct AnalyzeQuery<'a> {
            url: &'a str,
            max_comments: u32,
        }

        let query = AnalyzeQuery {
            url: post.as_str(),
            max_comments,
        };

        self.limiter.until_ready().await;
        debug!(endpoint = %self.endpoint, "requesting analysis");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&query)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::from_response(status, &body));
        }

        serde_json::from_slice(&body)
            .map_err(|e| Error::Unknown(format!("malformed analysis response: {}", e)))
    }
}

fn endpoint<U: IntoUrl>(api_base: U) -> Result<Url> {
    let mut url = api_base.into_url().map_err(|e| Error::Config(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("{} cannot be used as a base URL", url)));
    }

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("analyze_post");
    }
    Ok(url)
}
