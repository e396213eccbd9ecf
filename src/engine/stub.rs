use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::{ApiError, SubmissionError};
use crate::types::{
    CreatedIssue, IssueCount, IssueStatus, MediaDetails, MediaType, PublicSettings,
    ReportContext, Viewer,
};

use super::interface::{Engine, EngineHandle, Event, Request};

/// A stub engine that serves pre-loaded fixture data without any network calls.
///
/// Useful for integration tests and demos that must not require a running
/// media server.
pub struct StubEngine {
    pub movies: Vec<MediaDetails>,
    pub series: Vec<MediaDetails>,
    pub viewer: Viewer,
    pub settings: PublicSettings,
    pub count: IssueCount,
    /// Answer every submission with a server error.
    pub fail_submissions: bool,
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        let mut next_id = 1;
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchReportContext {
                    media_type,
                    tmdb_id,
                    reply_tx,
                    ..
                } => {
                    let event = match self.find(media_type, tmdb_id) {
                        Some(media) => Event::ContextFetched {
                            context: Box::new(ReportContext {
                                media_type,
                                media: media.clone(),
                                viewer: self.viewer.clone(),
                                settings: self.settings,
                            }),
                        },
                        None => Event::FetchError {
                            context: "stub".into(),
                            message: format!("no {media_type} {tmdb_id} in stub"),
                        },
                    };
                    let _ = reply_tx.send(event);
                }
                Request::FetchIssueCount { reply_tx, .. } => {
                    let _ = reply_tx.send(Event::IssueCountFetched { count: self.count });
                }
                Request::SubmitIssue { payload, reply_tx } => {
                    let event = if self.fail_submissions {
                        Event::SubmissionFailed {
                            error: SubmissionError::Api(ApiError::Status {
                                status: http::StatusCode::INTERNAL_SERVER_ERROR,
                                body: "stub failure".into(),
                            }),
                        }
                    } else {
                        let issue = CreatedIssue {
                            id: next_id,
                            issue_type: payload.issue_type,
                            status: IssueStatus::Open,
                            message: Some(payload.message),
                            media_id: Some(payload.media_id),
                            problem_season: payload.problem_season,
                            problem_episode: payload.problem_episode,
                            created_at: None,
                            updated_at: None,
                        };
                        next_id += 1;
                        Event::IssueCreated { issue }
                    };
                    let _ = reply_tx.send(event);
                }
                Request::Shutdown => break,
            }
        }
    }

    fn find(&self, media_type: MediaType, tmdb_id: u64) -> Option<&MediaDetails> {
        let pool = match media_type {
            MediaType::Movie => &self.movies,
            MediaType::Tv => &self.series,
        };
        pool.iter().find(|m| m.id == tmdb_id)
    }
}
