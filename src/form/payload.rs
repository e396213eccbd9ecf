use super::state::{IssueDetails, SubmissionState};
use crate::types::{IssueCreationPayload, VideoQuality};

/// Derive the wire payload from an already validated state.
///
/// The episode is forced to `0` whenever the season is "all", whatever the
/// episode field still holds from an earlier selection.
pub fn build_payload(state: &SubmissionState, media_id: u64) -> IssueCreationPayload {
    let message = match state.details() {
        IssueDetails::Freeform { message } => message.to_owned(),
        IssueDetails::UpgradeRequest {
            quality,
            upgrade_audio,
        } => upgrade_summary(quality, upgrade_audio),
    };

    IssueCreationPayload {
        issue_type: state.issue_type(),
        message,
        media_id,
        problem_season: state.problem_season(),
        problem_episode: effective_episode(state),
    }
}

fn effective_episode(state: &SubmissionState) -> u32 {
    if state.problem_season() > 0 {
        state.problem_episode()
    } else {
        0
    }
}

// Upgrade choices travel as a single free-text line; the server has no
// structured fields for them.
fn upgrade_summary(quality: VideoQuality, upgrade_audio: bool) -> String {
    let mut message = String::new();
    if quality.is_selected() {
        message.push_str("Requested Quality: ");
        message.push_str(&quality.to_string());
    }
    if upgrade_audio {
        if !message.is_empty() {
            message.push_str("; ");
        }
        message.push_str("Audio upgrade requested");
    }
    message
}
