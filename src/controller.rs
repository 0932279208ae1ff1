use crate::client::Client;
use crate::filter::CommentFilter;
use crate::validate::validate;
use crate::view::{AnalysisView, ViewState};
use async_stream::stream;
use futures::Stream;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{info, warn};

/// Message left behind when a submission ends without a response being handled.
pub const INTERRUPTED: &str = "analysis request was interrupted";

/// How a call to [`AnalysisController::submit`] ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The submission ran to completion; this is the state it left behind.
    Settled(ViewState),

    /// Another submission is still loading, so nothing was sent.
    Busy,

    /// The controller was reset while the request was out; its result was dropped.
    Stale,
}

/// Owns the lifecycle of analysis requests for one view.
///
/// The state moves `Idle -> Loading -> Success | Failure`, and any submission
/// restarts it from `Loading`. At most one request is in flight: submitting
/// while loading is refused rather than queued or cancelled.
///
/// Each submission takes a new generation number. Responses are only applied
/// if their generation is still current, so after [`reset`](Self::reset) a
/// late response can't resurrect a result the view no longer wants.
pub struct AnalysisController {
    client: Client,
    filter: CommentFilter,
    state: watch::Sender<ViewState>,
    generation: AtomicU64,
}

impl AnalysisController {
    pub fn new(client: Client) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            client,
            filter: CommentFilter::default(),
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Uses `filter` instead of the default [`CommentFilter`] for later results.
    #[must_use]
    pub fn with_filter(mut self, filter: CommentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// A [`Stream`] yielding the current state and then every change to it.
    ///
    /// Intermediate states can be skipped if the consumer falls behind; the
    /// latest one is always delivered.
    pub fn states(&self) -> impl Stream<Item = ViewState> {
        let mut receiver = self.subscribe();
        stream! {
            let current = receiver.borrow_and_update().clone();
            yield current;
            while receiver.changed().await.is_ok() {
                let current = receiver.borrow_and_update().clone();
                yield current;
            }
        }
    }

    /// Drops any result or error and returns to `Idle`. A request still in
    /// flight is left to finish, but its response is discarded.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = ViewState::Idle;
        });
    }

    /// Validates `post_url` and, if it passes, fetches its analysis.
    ///
    /// Previous results are cleared before anything else happens. An invalid
    /// reference fails immediately without touching the network. `max_comments`
    /// is passed to the backend unchecked.
    pub async fn submit(&self, post_url: &str, max_comments: u32) -> SubmitOutcome {
        let mut started = None;
        let mut busy = false;

        self.state.send_if_modified(|state| {
            if state.is_loading() {
                busy = true;
                return false;
            }

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            match validate(post_url) {
                Ok(post) => {
                    *state = ViewState::Loading;
                    started = Some((generation, post));
                }
                Err(e) => *state = ViewState::Failure(e.to_string()),
            }
            true
        });

        if busy {
            warn!("analysis already in flight, ignoring submission");
            return SubmitOutcome::Busy;
        }

        let (generation, post) = match started {
            Some(started) => started,
            None => {
                warn!(input = post_url, "rejected post reference");
                return SubmitOutcome::Settled(self.state());
            }
        };

        let guard = LoadingGuard {
            controller: self,
            generation,
        };

        let next = match self.client.analyze(&post, max_comments).await {
            Ok(analysis) => {
                let view = AnalysisView::new(analysis, &self.filter);
                info!(
                    post_id = %view.post().id,
                    shown = view.post().top_comments.len(),
                    hidden = view.hidden_comments(),
                    "analysis loaded"
                );
                ViewState::Success(view)
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                ViewState::Failure(e.to_string())
            }
        };

        match guard.settle(next) {
            Some(state) => SubmitOutcome::Settled(state),
            None => {
                warn!(generation, "discarding response for a stale submission");
                SubmitOutcome::Stale
            }
        }
    }

    /// Replaces the state if `generation` is still current, returning the new state.
    fn settle_if_current(&self, generation: u64, next: ViewState) -> Option<ViewState> {
        let mut settled = None;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            settled = Some(next.clone());
            *state = next;
            true
        });
        settled
    }
}

/// Makes sure a submission never leaves the controller stuck in `Loading`,
/// even if its future is dropped or the request path panics.
struct LoadingGuard<'a> {
    controller: &'a AnalysisController,
    generation: u64,
}

impl LoadingGuard<'_> {
    fn settle(self, next: ViewState) -> Option<ViewState> {
        let settled = self.controller.settle_if_current(self.generation, next);
        std::mem::forget(self);
        settled
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self
            .controller
            .settle_if_current(self.generation, ViewState::Failure(INTERRUPTED.to_owned()))
            .is_some()
        {
            warn!(generation = self.generation, "analysis request interrupted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use futures::StreamExt;

    fn controller() -> AnalysisController {
        // Nothing listens here; tests in this module never reach the network.
        let config = Config::new().api_base("http://127.0.0.1:9");
        AnalysisController::new(Client::new(config).unwrap())
    }

    #[test]
    fn test_controller_is_send_and_sync() {
        fn is_send_and_sync<T: Send + Sync>() {}
        is_send_and_sync::<AnalysisController>();
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(controller().state(), ViewState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_reference_fails_without_loading() {
        let controller = controller();
        let outcome = controller.submit("https://example.com/post/1", 10).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Settled(ViewState::Failure("invalid post reference".to_owned()))
        );
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let controller = controller();
        controller.submit("nope", 10).await;
        controller.reset();
        assert_eq!(controller.state(), ViewState::Idle);
    }

    #[tokio::test]
    async fn test_states_stream_starts_with_current_state() {
        let controller = controller();
        let mut states = Box::pin(controller.states());
        assert_eq!(states.next().await, Some(ViewState::Idle));

        controller.submit("nope", 10).await;
        assert_eq!(
            states.next().await,
            Some(ViewState::Failure("invalid post reference".to_owned()))
        );
    }

    #[test]
    fn test_dropped_guard_clears_loading() {
        let controller = controller();
        controller.state.send_modify(|state| *state = ViewState::Loading);
        let generation = controller.generation.load(Ordering::SeqCst);

        drop(LoadingGuard {
            controller: &controller,
            generation,
        });

        assert_eq!(controller.state(), ViewState::Failure(INTERRUPTED.to_owned()));
    }

    #[test]
    fn test_guard_for_old_generation_does_nothing() {
        let controller = controller();
        let generation = controller.generation.load(Ordering::SeqCst);
        controller.reset();

        drop(LoadingGuard {
            controller: &controller,
            generation,
        });

        assert_eq!(controller.state(), ViewState::Idle);
    }
}
