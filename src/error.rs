use reqwest::StatusCode;
use serde::Deserialize;

/// Everything that can end a submission in a failure state.
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The post reference doesn't point at reddit. Raised before any network activity.
    #[error("invalid post reference")]
    Validation,

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// No response was received at all.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// Anything else, e.g. a success response we couldn't make sense of.
    #[error("{0}")]
    Unknown(String),

    /// The client could not be constructed from the given configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds a [`Error::Request`] from an error response, preferring the
    /// backend's `detail` string over a generic description.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: String,
        }

        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { detail }) => detail,
            Err(_) => format!("request failed with status code {}", status.as_u16()),
        };

        Error::Request { status, message }
    }
}
