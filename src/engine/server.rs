use tokio::sync::mpsc::UnboundedReceiver;

use crate::actions::issue_actions;
use crate::api::{ApiClient, lookup};
use crate::config::types::AppConfig;

use super::interface::{Engine, EngineHandle, Event, Request};

/// The real engine, talking to the media server over HTTP.
pub struct ServerEngine {
    client: ApiClient,
}

impl ServerEngine {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: ApiClient::new(&config.server, config.cache.ttl_minutes)?,
        })
    }
}

impl Engine for ServerEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        let handle = EngineHandle::new(tx);
        let _ = std::thread::Builder::new()
            .name("issues-engine".to_owned())
            .spawn(move || {
                let rt = tokio::runtime::Runtime::new().expect("tokio runtime init");
                rt.block_on(self.run_loop(rx));
            });
        handle
    }
}

impl ServerEngine {
    // Requests are handled one at a time, so a form never has two
    // submissions on the wire at once.
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            if matches!(req, Request::Shutdown) {
                break;
            }
            handle_request(req, &self.client).await;
        }
        tracing::debug!("engine: shutting down");
    }
}

// ---------------------------------------------------------------------------
// Request dispatch
// ---------------------------------------------------------------------------

async fn handle_request(req: Request, client: &ApiClient) {
    match req {
        Request::FetchReportContext {
            media_type,
            tmdb_id,
            force,
            reply_tx,
        } => {
            match lookup::fetch_report_context(client, media_type, tmdb_id, force).await {
                Ok(context) => {
                    tracing::debug!("engine: sending ContextFetched[{media_type}/{tmdb_id}]");
                    let _ = reply_tx.send(Event::ContextFetched {
                        context: Box::new(context),
                    });
                }
                Err(e) => {
                    tracing::debug!("engine: FetchReportContext[{media_type}/{tmdb_id}] error: {e}");
                    let _ = reply_tx.send(Event::FetchError {
                        context: format!("FetchReportContext[{media_type}/{tmdb_id}]"),
                        message: e.to_string(),
                    });
                }
            }
        }

        Request::FetchIssueCount { force, reply_tx } => {
            match lookup::fetch_issue_count(client, force).await {
                Ok(count) => {
                    let _ = reply_tx.send(Event::IssueCountFetched { count });
                }
                Err(e) => {
                    tracing::debug!("engine: FetchIssueCount error: {e}");
                    let _ = reply_tx.send(Event::FetchError {
                        context: "FetchIssueCount".to_owned(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Request::SubmitIssue { payload, reply_tx } => {
            tracing::debug!(
                issue_type = u8::from(payload.issue_type),
                media_id = payload.media_id,
                "engine: submitting issue"
            );
            let event = match issue_actions::create(client, &payload).await {
                Ok(issue) => Event::IssueCreated { issue },
                Err(error) => Event::SubmissionFailed { error },
            };
            let _ = reply_tx.send(event);
        }

        Request::Shutdown => {}
    }
}
