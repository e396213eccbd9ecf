use http::StatusCode;
use thiserror::Error;

/// Failure talking to the media server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issue creation did not go through. The form keeps its state so the user
/// can retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("engine is not running")]
    EngineGone,

    #[error("unexpected reply from engine")]
    UnexpectedReply,
}

/// The media, viewer or settings lookup has not produced usable data.
/// Report controls stay disabled while this holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUnavailableError {
    #[error("still loading")]
    Pending,

    #[error("could not load media details: {message}")]
    Fetch { message: String },

    #[error("this title is not tracked by the server yet")]
    NotTracked,
}

impl From<ApiError> for DataUnavailableError {
    fn from(err: ApiError) -> Self {
        Self::Fetch {
            message: err.to_string(),
        }
    }
}
