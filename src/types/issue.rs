use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Issue-specific enums
// ---------------------------------------------------------------------------

/// Kind of problem being reported. Encoded as an integer `1..=5` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IssueType {
    Video,
    Audio,
    Subtitles,
    Other,
    UpgradeQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue type {0}")]
pub struct UnknownIssueType(pub u8);

impl TryFrom<u8> for IssueType {
    type Error = UnknownIssueType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Video),
            2 => Ok(Self::Audio),
            3 => Ok(Self::Subtitles),
            4 => Ok(Self::Other),
            5 => Ok(Self::UpgradeQuality),
            other => Err(UnknownIssueType(other)),
        }
    }
}

impl From<IssueType> for u8 {
    fn from(value: IssueType) -> Self {
        match value {
            IssueType::Video => 1,
            IssueType::Audio => 2,
            IssueType::Subtitles => 3,
            IssueType::Other => 4,
            IssueType::UpgradeQuality => 5,
        }
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "subtitle" | "subtitles" => Ok(Self::Subtitles),
            "other" => Ok(Self::Other),
            "upgrade-quality" | "upgrade" => Ok(Self::UpgradeQuality),
            other => Err(format!(
                "unknown issue type {other:?} (expected video, audio, subtitles, other or upgrade-quality)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum IssueStatus {
    #[default]
    Open,
    Resolved,
    Unknown,
}

impl From<u8> for IssueStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Open,
            2 => Self::Resolved,
            _ => Self::Unknown,
        }
    }
}

impl From<IssueStatus> for u8 {
    fn from(value: IssueStatus) -> Self {
        match value {
            IssueStatus::Open => 1,
            IssueStatus::Resolved => 2,
            IssueStatus::Unknown => 0,
        }
    }
}

/// Video quality asked for by an upgrade request. `None` means no video upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoQuality {
    #[default]
    None,
    Hd,
    Uhd,
    AiUpscale,
}

impl VideoQuality {
    pub fn is_selected(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Hd => "HD",
            Self::Uhd => "UHD",
            Self::AiUpscale => "AI Upscale",
        })
    }
}

impl FromStr for VideoQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "" | "none" => Ok(Self::None),
            "hd" => Ok(Self::Hd),
            "uhd" | "4k" => Ok(Self::Uhd),
            "ai-upscale" => Ok(Self::AiUpscale),
            other => Err(format!(
                "unknown video quality {other:?} (expected hd, uhd or ai-upscale)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Issue wire types
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/issue`. Seasons and episodes use `0` for "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreationPayload {
    pub issue_type: IssueType,
    pub message: String,
    pub media_id: u64,
    pub problem_season: u32,
    pub problem_episode: u32,
}

/// Issue record echoed back by the server after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedIssue {
    pub id: u64,
    pub issue_type: IssueType,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub media_id: Option<u64>,
    #[serde(default)]
    pub problem_season: u32,
    #[serde(default)]
    pub problem_episode: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CreatedIssue {
    /// Relative link to the issue detail view.
    pub fn detail_path(&self) -> String {
        format!("/issues/{}", self.id)
    }
}

/// Totals from `GET /api/v1/issue/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueCount {
    pub total: u64,
    pub video: u64,
    pub audio: u64,
    pub subtitles: u64,
    pub others: u64,
    pub open: u64,
    pub closed: u64,
}
