use crate::api::{self, ApiClient};
use crate::error::SubmissionError;
use crate::types::{CreatedIssue, IssueCreationPayload};

// ---------------------------------------------------------------------------
// Issue action API calls
// ---------------------------------------------------------------------------

/// Create an issue from a validated payload.
///
/// Single attempt; no retry. On success the cached issue count is dropped so
/// the next count lookup reflects the new issue.
pub async fn create(
    client: &ApiClient,
    payload: &IssueCreationPayload,
) -> Result<CreatedIssue, SubmissionError> {
    let issue: CreatedIssue = client.post_json(api::ISSUE_PATH, payload).await?;
    client.invalidate(api::ISSUE_COUNT_PATH).await;
    Ok(issue)
}
