// api module — media server HTTP access

pub mod auth;
pub mod client;
pub mod lookup;

pub use client::ApiClient;

use crate::types::MediaType;

pub const ISSUE_PATH: &str = "/api/v1/issue";
pub const ISSUE_COUNT_PATH: &str = "/api/v1/issue/count";
pub const VIEWER_PATH: &str = "/api/v1/auth/me";
pub const PUBLIC_SETTINGS_PATH: &str = "/api/v1/settings/public";

pub fn media_path(media_type: MediaType, tmdb_id: u64) -> String {
    format!("/api/v1/{}/{tmdb_id}", media_type.as_str())
}
