use std::sync::mpsc::Sender;

use crate::error::SubmissionError;
use crate::types::{CreatedIssue, IssueCount, IssueCreationPayload, MediaType, ReportContext};

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking — returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by both `ServerEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the UI layer can send to the engine.
pub enum Request {
    /// Load media, viewer and settings for a report dialog.
    FetchReportContext {
        media_type: MediaType,
        tmdb_id: u64,
        /// Skip the moka cache and fetch fresh data.
        force: bool,
        reply_tx: Sender<Event>,
    },
    FetchIssueCount {
        force: bool,
        reply_tx: Sender<Event>,
    },
    /// Create an issue. The payload is a snapshot taken when the user submitted.
    SubmitIssue {
        payload: IssueCreationPayload,
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

/// All events the engine can push back to the UI.
pub enum Event {
    ContextFetched {
        context: Box<ReportContext>,
    },
    IssueCountFetched {
        count: IssueCount,
    },
    /// Unified error event for lookup failures.
    FetchError {
        context: String,
        message: String,
    },
    IssueCreated {
        issue: CreatedIssue,
    },
    SubmissionFailed {
        error: SubmissionError,
    },
}

impl Event {
    /// Collapse a submission reply into the gateway result.
    pub fn into_submission_result(self) -> Result<CreatedIssue, SubmissionError> {
        match self {
            Self::IssueCreated { issue } => Ok(issue),
            Self::SubmissionFailed { error } => Err(error),
            Self::ContextFetched { .. }
            | Self::IssueCountFetched { .. }
            | Self::FetchError { .. } => Err(SubmissionError::UnexpectedReply),
        }
    }
}
