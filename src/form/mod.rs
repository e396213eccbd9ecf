// form module — report dialog state, validation and payload derivation

mod dialog;
mod payload;
mod state;
mod validate;

pub use dialog::{
    FormPhase, Notice, NoticeKind, ReportDialog, ReportForm, SeasonField, SelectOption,
    SelectionError, SubmitBlocked,
};
pub use payload::build_payload;
pub use state::{IssueDetails, SubmissionState};
pub use validate::{Field, MESSAGE_REQUIRED, UPGRADE_REQUIRED, ValidationErrors, validate};
