//! Read-only lookups that seed a report dialog.

use crate::api::{self, ApiClient};
use crate::error::ApiError;
use crate::types::{IssueCount, MediaDetails, MediaType, PublicSettings, ReportContext, Viewer};

pub async fn fetch_media(
    client: &ApiClient,
    media_type: MediaType,
    tmdb_id: u64,
    force: bool,
) -> Result<MediaDetails, ApiError> {
    client
        .get_json(&api::media_path(media_type, tmdb_id), force)
        .await
}

// The viewer is never cached: permissions can change between dialogs.
pub async fn fetch_viewer(client: &ApiClient) -> Result<Viewer, ApiError> {
    client.get_json(api::VIEWER_PATH, true).await
}

pub async fn fetch_public_settings(
    client: &ApiClient,
    force: bool,
) -> Result<PublicSettings, ApiError> {
    client.get_json(api::PUBLIC_SETTINGS_PATH, force).await
}

pub async fn fetch_issue_count(client: &ApiClient, force: bool) -> Result<IssueCount, ApiError> {
    client.get_json(api::ISSUE_COUNT_PATH, force).await
}

/// Fetch media, viewer and settings concurrently.
pub async fn fetch_report_context(
    client: &ApiClient,
    media_type: MediaType,
    tmdb_id: u64,
    force: bool,
) -> Result<ReportContext, ApiError> {
    let (media, viewer, settings) = tokio::try_join!(
        fetch_media(client, media_type, tmdb_id, force),
        fetch_viewer(client),
        fetch_public_settings(client, force),
    )?;
    Ok(ReportContext {
        media_type,
        media,
        viewer,
        settings,
    })
}
