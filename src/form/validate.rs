use std::fmt;

use indexmap::IndexMap;

use super::state::{IssueDetails, SubmissionState};
use crate::types::VideoQuality;

pub const MESSAGE_REQUIRED: &str = "You must provide a description";
pub const UPGRADE_REQUIRED: &str = "You must select a video quality or request an audio upgrade";

/// Form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Message,
    RequestedVideoQuality,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::RequestedVideoQuality => "requestedVideoQuality",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-scoped validation errors, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(IndexMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Check the fields the current issue type reads. Never fails; an empty
/// result means the state may be submitted.
pub fn validate(state: &SubmissionState) -> ValidationErrors {
    match state.details() {
        IssueDetails::Freeform { message } => validate_freeform(message),
        IssueDetails::UpgradeRequest {
            quality,
            upgrade_audio,
        } => validate_upgrade_request(quality, upgrade_audio),
    }
}

fn validate_freeform(message: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if message.trim().is_empty() {
        errors.insert(Field::Message, MESSAGE_REQUIRED);
    }
    errors
}

// At least one upgrade must be asked for; both together are fine.
fn validate_upgrade_request(quality: VideoQuality, upgrade_audio: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if !quality.is_selected() && !upgrade_audio {
        errors.insert(Field::RequestedVideoQuality, UPGRADE_REQUIRED);
    }
    errors
}
