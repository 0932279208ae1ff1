//! # postmood
//!
//! The `postmood` crate is the client side of a reddit post sentiment analysis
//! service. It validates a post reference, asks the backend for the analysis
//! of that post and its top-level comments, and turns the answer into
//! something a view can draw: moderator, bot and deleted comments are filtered
//! out, and every remaining comment is bucketed as positive, negative or
//! neutral.
//!
//! ## Analyzing a post
//!
//! ```rust,no_run
//! use postmood::{AnalysisController, Client, Config, SubmitOutcome, ViewState};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), postmood::Error> {
//! let client = Client::new(Config::from_env())?;
//! let controller = AnalysisController::new(client);
//!
//! let url = "https://www.reddit.com/r/wallstreetbets/comments/1abcde/daily_discussion/";
//! if let SubmitOutcome::Settled(ViewState::Success(view)) = controller.submit(url, 25).await {
//!     for classified in view.comments() {
//!         println!("{:?}: {}", classified.bucket, classified.comment.body);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Watching the state
//!
//! The controller only ever holds one of `Idle`, `Loading`, `Success` or
//! `Failure`. A renderer can follow it with [`AnalysisController::states`]:
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use postmood::{AnalysisController, ViewState};
//!
//! async fn render(controller: &AnalysisController) {
//!     let mut states = Box::pin(controller.states());
//!     while let Some(state) = states.next().await {
//!         match state {
//!             ViewState::Idle => {}
//!             ViewState::Loading => println!("analyzing..."),
//!             ViewState::Success(view) => println!("{}", view.post().title),
//!             ViewState::Failure(message) => println!("error: {}", message),
//!         }
//!     }
//! }
//! ```
//!
//! **NOTE**: Only one submission per controller can be loading at a time. Further
//! submissions return [`SubmitOutcome::Busy`] until it settles.

pub mod models;

mod classify;
mod client;
mod config;
mod controller;
mod error;
mod filter;
mod validate;
mod view;

pub use classify::{classify, Bucket, NEUTRAL_BAND};
pub use client::Client;
pub use config::{Config, DEFAULT_COMMENT_LIMIT, MAX_COMMENT_LIMIT};
pub use controller::{AnalysisController, SubmitOutcome, INTERRUPTED};
pub use error::{Error, Result};
pub use filter::{filter, CommentFilter};
pub use validate::{validate, PostReference, PLATFORM_DOMAIN};
pub use view::{AnalysisView, ClassifiedComment, SentimentSummary, ViewState};
