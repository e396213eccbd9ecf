use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Media enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the media lookup endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" | "series" | "show" => Ok(Self::Tv),
            other => Err(format!("unknown media type {other:?} (expected movie or tv)")),
        }
    }
}

/// Fulfillment state of a title or season, as integers on the wire.
///
/// Unrecognised integers decode as [`AvailabilityStatus::Unknown`] so newer
/// servers can add states without breaking the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum AvailabilityStatus {
    #[default]
    Unknown,
    Pending,
    Processing,
    PartiallyAvailable,
    Available,
    Deleted,
}

impl AvailabilityStatus {
    /// Whether files exist for this status, fully or in part.
    pub fn has_files(self) -> bool {
        matches!(self, Self::Available | Self::PartiallyAvailable)
    }
}

impl From<u32> for AvailabilityStatus {
    fn from(value: u32) -> Self {
        match value {
            2 => Self::Pending,
            3 => Self::Processing,
            4 => Self::PartiallyAvailable,
            5 => Self::Available,
            6 => Self::Deleted,
            _ => Self::Unknown,
        }
    }
}

impl From<AvailabilityStatus> for u32 {
    fn from(value: AvailabilityStatus) -> Self {
        match value {
            AvailabilityStatus::Unknown => 1,
            AvailabilityStatus::Pending => 2,
            AvailabilityStatus::Processing => 3,
            AvailabilityStatus::PartiallyAvailable => 4,
            AvailabilityStatus::Available => 5,
            AvailabilityStatus::Deleted => 6,
        }
    }
}

// ---------------------------------------------------------------------------
// Season availability
// ---------------------------------------------------------------------------

/// Availability of one season. `season_number == 0` is the extras/specials season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAvailability {
    pub season_number: u32,
    pub status: AvailabilityStatus,
    #[serde(rename = "status4k")]
    pub status_4k: AvailabilityStatus,
    #[serde(default)]
    pub episode_count: u32,
}

// ---------------------------------------------------------------------------
// Media lookup response
// ---------------------------------------------------------------------------

/// Movie or series details as returned by `GET /api/v1/{movie|tv}/{tmdbId}`.
///
/// Movies carry `title`, series carry `name`; only the fields the report
/// workflow reads are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Catalog seasons (episode counts).
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    /// Tracked media record; absent when the title was never requested or scanned.
    #[serde(default)]
    pub media_info: Option<MediaInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: u64,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(default, rename = "status4k")]
    pub status_4k: AvailabilityStatus,
    #[serde(default)]
    pub seasons: Vec<SeasonStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatus {
    pub season_number: u32,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(default, rename = "status4k")]
    pub status_4k: AvailabilityStatus,
}

impl MediaDetails {
    /// Movie title or series name, whichever is present.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Identifier of the tracked media record, used as `mediaId` on issues.
    pub fn media_id(&self) -> Option<u64> {
        self.media_info.as_ref().map(|info| info.id)
    }

    /// Join tracked season statuses with catalog episode counts.
    ///
    /// Order follows the tracked record. A status row with no catalog season
    /// gets an episode count of zero.
    pub fn season_availability(&self) -> Vec<SeasonAvailability> {
        let Some(info) = &self.media_info else {
            return Vec::new();
        };
        info.seasons
            .iter()
            .map(|s| SeasonAvailability {
                season_number: s.season_number,
                status: s.status,
                status_4k: s.status_4k,
                episode_count: self
                    .seasons
                    .iter()
                    .find(|c| c.season_number == s.season_number)
                    .map_or(0, |c| c.episode_count),
            })
            .collect()
    }
}
