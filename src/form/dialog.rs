use thiserror::Error;

use super::payload::build_payload;
use super::state::SubmissionState;
use super::validate::{ValidationErrors, validate};
use crate::availability;
use crate::error::{DataUnavailableError, SubmissionError};
use crate::types::{
    CreatedIssue, IssueCreationPayload, MediaType, ReportContext, SeasonAvailability,
};

// ---------------------------------------------------------------------------
// Dialog lifecycle
// ---------------------------------------------------------------------------

/// A report dialog before and after its data arrives.
#[derive(Debug)]
pub enum ReportDialog {
    Loading,
    Unavailable(DataUnavailableError),
    Ready(Box<ReportForm>),
}

impl ReportDialog {
    /// Open the dialog from the result of the upstream lookup.
    pub fn from_fetch(result: Result<ReportContext, DataUnavailableError>) -> Self {
        match result.and_then(ReportForm::new) {
            Ok(form) => Self::Ready(Box::new(form)),
            Err(DataUnavailableError::Pending) => Self::Loading,
            Err(err) => Self::Unavailable(err),
        }
    }

    /// Season, episode and type controls only accept input once data is loaded.
    pub fn controls_enabled(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn form(&self) -> Option<&ReportForm> {
        match self {
            Self::Ready(form) => Some(form.as_ref()),
            Self::Loading | Self::Unavailable(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ReportForm> {
        match self {
            Self::Ready(form) => Some(form.as_mut()),
            Self::Loading | Self::Unavailable(_) => None,
        }
    }

    /// Why the form is not usable, if it is not.
    pub fn unavailable_reason(&self) -> Option<DataUnavailableError> {
        match self {
            Self::Loading => Some(DataUnavailableError::Pending),
            Self::Unavailable(err) => Some(err.clone()),
            Self::Ready(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted(CreatedIssue),
}

/// One option of a season or episode picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonField {
    pub options: Vec<SelectOption>,
    /// Exactly one season qualifies; it is preselected and cannot change.
    pub fixed: bool,
}

impl SeasonField {
    pub fn contains(&self, value: u32) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("movies have no seasons")]
    NoSeasons,
    #[error("only one season can be reported; it cannot be changed")]
    SeasonFixed,
    #[error("season {0} is not available for reporting")]
    UnknownSeason(u32),
    #[error("pick a specific season before choosing an episode")]
    NoSeasonSelected,
    #[error("episode {episode} is not in season {season}")]
    UnknownEpisode { season: u32, episode: u32 },
}

#[derive(Debug, Clone, Error)]
pub enum SubmitBlocked {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("this report was already submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient user-facing message after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Link to the created issue.
    pub link: Option<String>,
}

// ---------------------------------------------------------------------------
// Report form
// ---------------------------------------------------------------------------

/// A loaded report dialog for one title.
#[derive(Debug)]
pub struct ReportForm {
    media_type: MediaType,
    media_id: u64,
    title: String,
    seasons: Vec<SeasonAvailability>,
    eligible: Vec<u32>,
    state: SubmissionState,
    phase: FormPhase,
}

impl ReportForm {
    /// Build the initial form. A single eligible season is preselected.
    pub fn new(ctx: ReportContext) -> Result<Self, DataUnavailableError> {
        let media_id = ctx.media.media_id().ok_or(DataUnavailableError::NotTracked)?;

        let (seasons, eligible) = match ctx.media_type {
            MediaType::Movie => (Vec::new(), Vec::new()),
            MediaType::Tv => {
                let seasons = ctx.media.season_availability();
                let eligible = availability::resolve(
                    &seasons,
                    ctx.viewer.permissions,
                    ctx.settings.series_4k_enabled,
                );
                (seasons, eligible)
            }
        };

        let initial_season = match eligible.as_slice() {
            [only] => *only,
            _ => 0,
        };
        tracing::debug!(
            media_id,
            eligible = ?eligible,
            initial_season,
            "form: opened report dialog"
        );

        Ok(Self {
            media_type: ctx.media_type,
            media_id,
            title: ctx.media.display_title().to_owned(),
            seasons,
            eligible,
            state: SubmissionState::new(initial_season),
            phase: FormPhase::Editing,
        })
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn media_id(&self) -> u64 {
        self.media_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn eligible_seasons(&self) -> &[u32] {
        &self.eligible
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Direct access for the type, message and upgrade fields. Season and
    /// episode go through [`Self::select_season`] / [`Self::select_episode`].
    pub fn state_mut(&mut self) -> &mut SubmissionState {
        &mut self.state
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Season picker for series; `None` for movies.
    pub fn season_field(&self) -> Option<SeasonField> {
        if self.media_type == MediaType::Movie {
            return None;
        }
        let mut options = Vec::with_capacity(self.eligible.len() + 1);
        if self.eligible.len() > 1 {
            options.push(SelectOption {
                value: 0,
                label: "All Seasons".to_owned(),
            });
        }
        options.extend(self.eligible.iter().map(|&n| SelectOption {
            value: n,
            label: season_label(n),
        }));
        Some(SeasonField {
            options,
            fixed: self.eligible.len() == 1,
        })
    }

    /// Episode picker for the selected season; empty while "all seasons" is selected.
    pub fn episode_options(&self) -> Vec<SelectOption> {
        let season = self.state.problem_season();
        if season == 0 {
            return Vec::new();
        }
        let count = self.episode_count(season);
        std::iter::once(SelectOption {
            value: 0,
            label: "All Episodes".to_owned(),
        })
        .chain((1..=count).map(|n| SelectOption {
            value: n,
            label: format!("Episode {n}"),
        }))
        .collect()
    }

    pub fn select_season(&mut self, season: u32) -> Result<(), SelectionError> {
        let field = self.season_field().ok_or(SelectionError::NoSeasons)?;
        if field.fixed && season != self.state.problem_season() {
            return Err(SelectionError::SeasonFixed);
        }
        if !field.contains(season) {
            return Err(SelectionError::UnknownSeason(season));
        }
        self.state.set_season(season);
        Ok(())
    }

    pub fn select_episode(&mut self, episode: u32) -> Result<(), SelectionError> {
        let season = self.state.problem_season();
        if season == 0 {
            return Err(SelectionError::NoSeasonSelected);
        }
        if episode > self.episode_count(season) {
            return Err(SelectionError::UnknownEpisode { season, episode });
        }
        self.state.set_episode(episode);
        Ok(())
    }

    pub fn validate(&self) -> ValidationErrors {
        validate(&self.state)
    }

    /// Validate and move to `Submitting`, returning a snapshot of the payload.
    ///
    /// Later edits do not affect the snapshot. Only one submission may be in
    /// flight per form.
    pub fn begin_submit(&mut self) -> Result<IssueCreationPayload, SubmitBlocked> {
        match self.phase {
            FormPhase::Submitting => return Err(SubmitBlocked::InFlight),
            FormPhase::Submitted(_) => return Err(SubmitBlocked::AlreadySubmitted),
            FormPhase::Editing => {}
        }
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitBlocked::Invalid(errors));
        }
        self.phase = FormPhase::Submitting;
        Ok(build_payload(&self.state, self.media_id))
    }

    /// Apply the gateway outcome. Failures return to `Editing` with every
    /// field intact.
    pub fn finish_submit(&mut self, result: Result<CreatedIssue, SubmissionError>) -> Notice {
        match result {
            Ok(issue) => {
                tracing::info!(issue_id = issue.id, media_id = self.media_id, "issue created");
                let notice = Notice {
                    kind: NoticeKind::Success,
                    text: format!("Issue report for {} submitted successfully!", self.title),
                    link: Some(issue.detail_path()),
                };
                self.phase = FormPhase::Submitted(issue);
                notice
            }
            Err(err) => {
                tracing::warn!(media_id = self.media_id, "issue submission failed: {err}");
                self.phase = FormPhase::Editing;
                Notice {
                    kind: NoticeKind::Error,
                    text: "Something went wrong while submitting the issue.".to_owned(),
                    link: None,
                }
            }
        }
    }

    /// Episodes known for `season`; `0` when the catalog has no count.
    pub fn episode_count(&self, season: u32) -> u32 {
        self.seasons
            .iter()
            .find(|s| s.season_number == season)
            .map_or(0, |s| s.episode_count)
    }
}

fn season_label(season: u32) -> String {
    if season == 0 {
        "Extras".to_owned()
    } else {
        format!("Season {season}")
    }
}
