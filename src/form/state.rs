use crate::catalog::{self, FieldShape};
use crate::types::{IssueType, VideoQuality};

/// Editable fields of one report dialog.
///
/// Setters are plain writes. Fields for the other issue shape are kept when
/// the type changes, so switching back restores what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionState {
    issue_type: IssueType,
    message: String,
    problem_season: u32,
    problem_episode: u32,
    requested_quality: VideoQuality,
    upgrade_audio: bool,
}

/// The fields read for the current issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueDetails<'a> {
    Freeform {
        message: &'a str,
    },
    UpgradeRequest {
        quality: VideoQuality,
        upgrade_audio: bool,
    },
}

impl SubmissionState {
    /// Fresh state with the default issue type. `initial_season` is `0` for
    /// "all seasons".
    pub fn new(initial_season: u32) -> Self {
        Self {
            issue_type: catalog::default_option().issue_type,
            message: String::new(),
            problem_season: initial_season,
            problem_episode: 0,
            requested_quality: VideoQuality::None,
            upgrade_audio: false,
        }
    }

    pub fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn problem_season(&self) -> u32 {
        self.problem_season
    }

    /// Raw episode field. May be stale when the season is "all"; see
    /// [`crate::form::build_payload`].
    pub fn problem_episode(&self) -> u32 {
        self.problem_episode
    }

    pub fn requested_quality(&self) -> VideoQuality {
        self.requested_quality
    }

    pub fn upgrade_audio(&self) -> bool {
        self.upgrade_audio
    }

    pub fn set_issue_type(&mut self, issue_type: IssueType) {
        self.issue_type = issue_type;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_season(&mut self, season: u32) {
        self.problem_season = season;
    }

    pub fn set_episode(&mut self, episode: u32) {
        self.problem_episode = episode;
    }

    pub fn set_requested_quality(&mut self, quality: VideoQuality) {
        self.requested_quality = quality;
    }

    pub fn set_upgrade_audio(&mut self, upgrade_audio: bool) {
        self.upgrade_audio = upgrade_audio;
    }

    pub fn details(&self) -> IssueDetails<'_> {
        match catalog::shape(self.issue_type) {
            FieldShape::Freeform => IssueDetails::Freeform {
                message: &self.message,
            },
            FieldShape::UpgradeRequest => IssueDetails::UpgradeRequest {
                quality: self.requested_quality,
                upgrade_audio: self.upgrade_audio,
            },
        }
    }
}
