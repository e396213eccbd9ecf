//! Registry of reportable issue kinds.
//!
//! Every branch on "free-text report vs. upgrade request" goes through
//! [`shape`] so callers never compare against individual issue types.

use crate::types::IssueType;

/// Which input fields an issue kind collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A required free-text description.
    Freeform,
    /// A requested video quality and/or an audio upgrade flag.
    UpgradeRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueTypeOption {
    pub issue_type: IssueType,
    pub label: &'static str,
}

// Display order. New kinds are appended.
const OPTIONS: [IssueTypeOption; 5] = [
    IssueTypeOption {
        issue_type: IssueType::Video,
        label: "Video",
    },
    IssueTypeOption {
        issue_type: IssueType::Audio,
        label: "Audio",
    },
    IssueTypeOption {
        issue_type: IssueType::Subtitles,
        label: "Subtitle",
    },
    IssueTypeOption {
        issue_type: IssueType::Other,
        label: "Other",
    },
    IssueTypeOption {
        issue_type: IssueType::UpgradeQuality,
        label: "Upgrade Quality",
    },
];

/// All options in display order.
pub fn options() -> &'static [IssueTypeOption] {
    &OPTIONS
}

/// The option selected when a dialog opens.
pub fn default_option() -> IssueTypeOption {
    OPTIONS[0]
}

pub fn label(issue_type: IssueType) -> &'static str {
    OPTIONS
        .iter()
        .find(|o| o.issue_type == issue_type)
        .map_or("Unknown", |o| o.label)
}

pub fn shape(issue_type: IssueType) -> FieldShape {
    match issue_type {
        IssueType::UpgradeQuality => FieldShape::UpgradeRequest,
        IssueType::Video | IssueType::Audio | IssueType::Subtitles | IssueType::Other => {
            FieldShape::Freeform
        }
    }
}

pub fn requires_structured_fields(issue_type: IssueType) -> bool {
    shape(issue_type) == FieldShape::UpgradeRequest
}
