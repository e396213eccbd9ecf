use media_issues::error::{ApiError, DataUnavailableError, SubmissionError};
use media_issues::form::{
    Field, FormPhase, NoticeKind, ReportDialog, ReportForm, SelectionError, SubmitBlocked,
    UPGRADE_REQUIRED,
};
use media_issues::types::{
    CreatedIssue, IssueStatus, IssueType, MediaDetails, MediaType, Permission, PermissionSet,
    PublicSettings, ReportContext, VideoQuality, Viewer,
};

fn load(json: &str) -> MediaDetails {
    serde_json::from_str(json).expect("valid media fixture")
}

fn series() -> MediaDetails {
    load(include_str!("fixtures/tv_details.json"))
}

fn single_season_series() -> MediaDetails {
    load(include_str!("fixtures/tv_single_season.json"))
}

fn movie() -> MediaDetails {
    load(include_str!("fixtures/movie_details.json"))
}

fn context(
    media_type: MediaType,
    media: MediaDetails,
    permissions: PermissionSet,
    series_4k_enabled: bool,
) -> ReportContext {
    ReportContext {
        media_type,
        media,
        viewer: Viewer {
            id: 1,
            display_name: Some("viewer".into()),
            permissions,
        },
        settings: PublicSettings { series_4k_enabled },
    }
}

fn plain_viewer() -> PermissionSet {
    PermissionSet::from_iter([Permission::Request, Permission::CreateIssues])
}

fn open(ctx: ReportContext) -> ReportForm {
    ReportForm::new(ctx).expect("tracked media opens a form")
}

fn created(id: u64, issue_type: IssueType) -> CreatedIssue {
    CreatedIssue {
        id,
        issue_type,
        status: IssueStatus::Open,
        message: None,
        media_id: Some(42),
        problem_season: 0,
        problem_episode: 0,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn series_offers_all_seasons_plus_eligible_ones() {
    let form = open(context(MediaType::Tv, series(), plain_viewer(), true));
    assert_eq!(form.eligible_seasons(), &[1, 2]);
    assert_eq!(form.state().problem_season(), 0);

    let field = form.season_field().expect("series have a season field");
    assert!(!field.fixed);
    let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["All Seasons", "Season 1", "Season 2"]);
    assert!(form.episode_options().is_empty());
}

#[test]
fn four_k_viewer_sees_4k_only_season() {
    let perms = plain_viewer().with(Permission::Request4kTv);
    let form = open(context(MediaType::Tv, series(), perms, true));
    assert_eq!(form.eligible_seasons(), &[1, 2, 3]);

    let disabled = open(context(MediaType::Tv, series(), perms, false));
    assert_eq!(disabled.eligible_seasons(), &[1, 2]);
}

#[test]
fn single_eligible_season_is_preselected_and_fixed() {
    let mut form = open(context(MediaType::Tv, single_season_series(), plain_viewer(), false));
    assert_eq!(form.eligible_seasons(), &[2]);
    assert_eq!(form.state().problem_season(), 2);

    let field = form.season_field().unwrap();
    assert!(field.fixed);
    assert_eq!(field.options.len(), 1);
    assert_eq!(field.options[0].label, "Season 2");

    assert_eq!(form.select_season(0), Err(SelectionError::SeasonFixed));
    assert_eq!(form.select_season(2), Ok(()));

    let episodes: Vec<u32> = form.episode_options().iter().map(|o| o.value).collect();
    assert_eq!(episodes, vec![0, 1, 2, 3, 4]);
}

#[test]
fn episode_options_follow_selected_season() {
    let mut form = open(context(MediaType::Tv, series(), plain_viewer(), false));
    form.select_season(2).unwrap();
    let options = form.episode_options();
    assert_eq!(options.len(), 9);
    assert_eq!(options[0].label, "All Episodes");
    assert_eq!(options[8].label, "Episode 8");

    assert_eq!(
        form.select_episode(9),
        Err(SelectionError::UnknownEpisode {
            season: 2,
            episode: 9
        })
    );
    assert_eq!(form.select_season(3), Err(SelectionError::UnknownSeason(3)));
}

#[test]
fn stale_episode_is_not_submitted_after_switching_to_all_seasons() {
    let mut form = open(context(MediaType::Tv, series(), plain_viewer(), false));
    form.select_season(1).unwrap();
    form.select_episode(4).unwrap();
    form.select_season(0).unwrap();
    assert_eq!(form.state().problem_episode(), 4);

    form.state_mut().set_message("dialogue is out of sync");
    let payload = form.begin_submit().unwrap();
    assert_eq!(payload.problem_season, 0);
    assert_eq!(payload.problem_episode, 0);
    assert_eq!(payload.media_id, 42);
    assert_eq!(payload.issue_type, IssueType::Video);
}

#[test]
fn movie_has_no_season_field() {
    let mut form = open(context(MediaType::Movie, movie(), plain_viewer(), true));
    assert!(form.season_field().is_none());
    assert_eq!(form.select_season(1), Err(SelectionError::NoSeasons));
    assert_eq!(form.title(), "The Matrix");
    assert_eq!(form.media_id(), 5);
}

#[test]
fn invalid_upgrade_request_is_blocked_locally() {
    let mut form = open(context(MediaType::Movie, movie(), plain_viewer(), false));
    form.state_mut().set_issue_type(IssueType::UpgradeQuality);

    match form.begin_submit() {
        Err(SubmitBlocked::Invalid(errors)) => {
            assert_eq!(errors.get(Field::RequestedVideoQuality), Some(UPGRADE_REQUIRED));
        }
        other => panic!("expected validation block, got {other:?}"),
    }
    assert!(matches!(form.phase(), FormPhase::Editing));

    form.state_mut().set_requested_quality(VideoQuality::Uhd);
    form.state_mut().set_upgrade_audio(true);
    let payload = form.begin_submit().unwrap();
    assert_eq!(
        payload.message,
        "Requested Quality: UHD; Audio upgrade requested"
    );
}

#[test]
fn only_one_submission_in_flight() {
    let mut form = open(context(MediaType::Movie, movie(), plain_viewer(), false));
    form.state_mut().set_message("no audio track");
    let snapshot = form.begin_submit().unwrap();
    assert!(matches!(form.begin_submit(), Err(SubmitBlocked::InFlight)));

    // Edits while the request is pending do not touch the snapshot.
    form.state_mut().set_message("changed my mind");
    assert_eq!(snapshot.message, "no audio track");
}

#[test]
fn failed_submission_keeps_input_for_retry() {
    let mut form = open(context(MediaType::Movie, movie(), plain_viewer(), false));
    form.state_mut().set_issue_type(IssueType::Audio);
    form.state_mut().set_message("no audio track");
    form.begin_submit().unwrap();

    let notice = form.finish_submit(Err(SubmissionError::Api(ApiError::Status {
        status: http::StatusCode::BAD_GATEWAY,
        body: String::new(),
    })));
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Something went wrong while submitting the issue.");
    assert!(matches!(form.phase(), FormPhase::Editing));
    assert_eq!(form.state().message(), "no audio track");
    assert_eq!(form.state().issue_type(), IssueType::Audio);

    let retry = form.begin_submit().unwrap();
    assert_eq!(retry.message, "no audio track");
}

#[test]
fn successful_submission_links_to_issue_and_closes() {
    let mut form = open(context(MediaType::Movie, movie(), plain_viewer(), false));
    form.state_mut().set_message("wrong movie");
    form.begin_submit().unwrap();

    let notice = form.finish_submit(Ok(created(17, IssueType::Video)));
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Issue report for The Matrix submitted successfully!");
    assert_eq!(notice.link.as_deref(), Some("/issues/17"));
    assert!(matches!(form.phase(), FormPhase::Submitted(issue) if issue.id == 17));
    assert!(matches!(
        form.begin_submit(),
        Err(SubmitBlocked::AlreadySubmitted)
    ));
}

#[test]
fn dialog_stays_disabled_until_data_arrives() {
    let loading = ReportDialog::from_fetch(Err(DataUnavailableError::Pending));
    assert!(matches!(loading, ReportDialog::Loading));
    assert!(!loading.controls_enabled());
    assert!(loading.form().is_none());

    let failed = ReportDialog::from_fetch(Err(DataUnavailableError::Fetch {
        message: "timeout".into(),
    }));
    assert!(!failed.controls_enabled());

    let mut untracked = movie();
    untracked.media_info = None;
    let dialog = ReportDialog::from_fetch(Ok(context(
        MediaType::Movie,
        untracked,
        plain_viewer(),
        false,
    )));
    assert_eq!(
        dialog.unavailable_reason(),
        Some(DataUnavailableError::NotTracked)
    );

    let ready = ReportDialog::from_fetch(Ok(context(
        MediaType::Movie,
        movie(),
        plain_viewer(),
        false,
    )));
    assert!(ready.controls_enabled());
    assert_eq!(
        ready.form().unwrap().state().issue_type(),
        IssueType::Video
    );
}
