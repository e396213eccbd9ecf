use super::media::{MediaDetails, MediaType};
use super::permission::{PublicSettings, Viewer};

/// Everything a report dialog needs before its controls can be enabled.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub media_type: MediaType,
    pub media: MediaDetails,
    pub viewer: Viewer,
    pub settings: PublicSettings,
}
