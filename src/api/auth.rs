/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "MEDIA_ISSUES_API_KEY";

/// Resolve the API key sent as `X-Api-Key`.
///
/// Priority:
/// 1. `server.api_key` from the config file
/// 2. `MEDIA_ISSUES_API_KEY` environment variable
///
/// Returns `None` when neither is set; requests then go out unauthenticated.
pub fn resolve_api_key(configured: Option<&str>) -> Option<String> {
    resolve_with(configured, |name| std::env::var(name).ok())
}

fn resolve_with(
    configured: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Some(key.trim().to_owned());
    }

    if let Some(key) = env(API_KEY_ENV)
        && !key.trim().is_empty()
    {
        return Some(key.trim().to_owned());
    }

    tracing::debug!("auth: no API key configured");
    None
}
