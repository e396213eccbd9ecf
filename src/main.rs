use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use media_issues::catalog;
use media_issues::config::loader;
use media_issues::engine::{Engine, EngineHandle, Event, Request, ServerEngine};
use media_issues::error::{DataUnavailableError, SubmissionError};
use media_issues::form::{NoticeKind, ReportDialog, ReportForm, SubmitBlocked};
use media_issues::types::{IssueType, MediaType, ReportContext, VideoQuality};

#[derive(Parser)]
#[command(name = "media-issues", version, about = "Report content issues for movies and series")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the issue types that can be reported.
    Types,
    /// Show which seasons and episodes of a title can be reported.
    Seasons {
        /// `movie` or `tv`.
        media_type: MediaType,
        /// TMDB identifier of the title.
        tmdb_id: u64,
    },
    /// Report an issue against a title.
    Report {
        /// `movie` or `tv`.
        media_type: MediaType,
        /// TMDB identifier of the title.
        tmdb_id: u64,
        /// video, audio, subtitles, other or upgrade-quality.
        #[arg(short = 't', long, default_value = "video")]
        issue_type: IssueType,
        /// Description of the problem (not used for upgrade requests).
        #[arg(short, long)]
        message: Option<String>,
        /// Affected season; omit for all seasons.
        #[arg(long)]
        season: Option<u32>,
        /// Affected episode; omit for all episodes.
        #[arg(long)]
        episode: Option<u32>,
        /// Requested video quality for upgrade requests: hd, uhd or ai-upscale.
        #[arg(long)]
        quality: Option<VideoQuality>,
        /// Ask for an audio upgrade to surround sound.
        #[arg(long)]
        upgrade_audio: bool,
    },
    /// Show issue totals.
    Count,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Types => {
            for option in catalog::options() {
                println!("{:>2}  {}", u8::from(option.issue_type), option.label);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Seasons {
            media_type,
            tmdb_id,
        } => {
            let engine = start_engine(config_path)?;
            let dialog = open_dialog(&engine, media_type, tmdb_id)?;
            let form = ready_form(&dialog)?;
            print_seasons(form);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Report {
            media_type,
            tmdb_id,
            issue_type,
            message,
            season,
            episode,
            quality,
            upgrade_audio,
        } => {
            let engine = start_engine(config_path)?;
            let mut dialog = open_dialog(&engine, media_type, tmdb_id)?;
            ready_form(&dialog)?;
            let Some(form) = dialog.form_mut() else {
                bail!("report form is not available");
            };

            let state = form.state_mut();
            state.set_issue_type(issue_type);
            if let Some(message) = message {
                state.set_message(message);
            }
            if let Some(quality) = quality {
                state.set_requested_quality(quality);
            }
            state.set_upgrade_audio(upgrade_audio);
            if let Some(season) = season {
                form.select_season(season)?;
            }
            if let Some(episode) = episode {
                form.select_episode(episode)?;
            }

            submit(&engine, form)
        }
        Commands::Count => {
            let engine = start_engine(config_path)?;
            let (tx, rx) = mpsc::channel();
            engine.send(Request::FetchIssueCount {
                force: true,
                reply_tx: tx,
            });
            match recv(&rx)? {
                Event::IssueCountFetched { count } => {
                    println!("total      {}", count.total);
                    println!("open       {}", count.open);
                    println!("closed     {}", count.closed);
                    println!("video      {}", count.video);
                    println!("audio      {}", count.audio);
                    println!("subtitles  {}", count.subtitles);
                    println!("other      {}", count.others);
                    Ok(ExitCode::SUCCESS)
                }
                Event::FetchError { message, .. } => bail!("could not load issue count: {message}"),
                _ => bail!("unexpected reply from engine"),
            }
        }
    }
}

/// Load config and start the engine thread. Dropping the returned handle
/// closes the request channel, which shuts the engine down.
fn start_engine(config_path: Option<&Path>) -> Result<EngineHandle> {
    let config = loader::load_config(config_path)?;
    let engine = ServerEngine::new(&config)?.start();
    tracing::info!(base_url = %config.server.base_url, "media-issues engine started");
    Ok(engine)
}

fn recv(rx: &Receiver<Event>) -> Result<Event> {
    rx.recv().context("engine stopped before replying")
}

/// Fetch everything the dialog needs; the dialog stays disabled until then.
fn open_dialog(engine: &EngineHandle, media_type: MediaType, tmdb_id: u64) -> Result<ReportDialog> {
    let (tx, rx) = mpsc::channel();
    engine.send(Request::FetchReportContext {
        media_type,
        tmdb_id,
        force: false,
        reply_tx: tx,
    });
    let result: Result<ReportContext, DataUnavailableError> = match recv(&rx)? {
        Event::ContextFetched { context } => Ok(*context),
        Event::FetchError { message, .. } => Err(DataUnavailableError::Fetch { message }),
        _ => Err(DataUnavailableError::Pending),
    };
    Ok(ReportDialog::from_fetch(result))
}

fn ready_form(dialog: &ReportDialog) -> Result<&ReportForm> {
    match (dialog.form(), dialog.unavailable_reason()) {
        (Some(form), _) => Ok(form),
        (None, Some(reason)) => bail!("{reason}"),
        (None, None) => bail!("report form is not available"),
    }
}

fn print_seasons(form: &ReportForm) {
    println!("{} (media #{})", form.title(), form.media_id());
    let Some(field) = form.season_field() else {
        println!("movie: no season selection");
        return;
    };
    if field.options.is_empty() {
        println!("no season is available for reporting");
        return;
    }
    if field.fixed {
        println!("season is fixed to the only available one");
    }
    // With several eligible seasons the first option is "All Seasons".
    let has_all_option = form.eligible_seasons().len() > 1;
    for (i, option) in field.options.iter().enumerate() {
        if i == 0 && has_all_option {
            println!("{:>4}  {}", option.value, option.label);
        } else {
            let episodes = form.episode_count(option.value);
            println!("{:>4}  {} ({episodes} episodes)", option.value, option.label);
        }
    }
}

fn submit(engine: &EngineHandle, form: &mut ReportForm) -> Result<ExitCode> {
    let payload = match form.begin_submit() {
        Ok(payload) => payload,
        Err(SubmitBlocked::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(blocked) => bail!("{blocked}"),
    };

    let (tx, rx) = mpsc::channel();
    engine.send(Request::SubmitIssue {
        payload,
        reply_tx: tx,
    });
    let result = match rx.recv() {
        Ok(event) => event.into_submission_result(),
        Err(_) => Err(SubmissionError::EngineGone),
    };
    if let Err(err) = &result {
        eprintln!("{err}");
    }

    let notice = form.finish_submit(result);
    match notice.kind {
        NoticeKind::Success => {
            println!("{}", notice.text);
            if let Some(link) = notice.link {
                println!("View Issue: {link}");
            }
            Ok(ExitCode::SUCCESS)
        }
        NoticeKind::Error => {
            eprintln!("{}", notice.text);
            Ok(ExitCode::FAILURE)
        }
    }
}
