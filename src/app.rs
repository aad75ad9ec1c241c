use crate::analyzer;
use crate::cli::RunOptions;
use crate::error::AppError;
use crate::remux::{DispositionRewriter, Install};
use crate::tracks::selection::{plan_from_directives, plan_interactive};
use crate::tracks::{Action, Plan, TrackKind};
use crate::utils::Dependencies;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, info};

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    /// Every pending rewrite succeeded (or was shown, in a dry run)
    Applied,
    /// Directives were given but none matched a track
    NothingMatched,
    /// Interactive mode ended without any selection
    NothingSelected,
    /// At least one rewrite failed, in the order they were attempted
    Failed(Vec<AppError>),
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Applied | Outcome::NothingMatched => ExitCode::SUCCESS,
            Outcome::NothingSelected | Outcome::Failed(_) => ExitCode::FAILURE,
        }
    }
}

/// Inspect the file, decide the new defaults and apply them
pub fn run<I: Install, R: BufRead, W: Write>(
    options: &RunOptions,
    deps: &Dependencies,
    rewriter: &DispositionRewriter<I>,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome, AppError> {
    let file = options.file.as_path();
    let audio_tracks = analyzer::inspect(&deps.ffprobe, file, TrackKind::Audio)?;
    let subtitle_tracks = analyzer::inspect(&deps.ffprobe, file, TrackKind::Subtitle)?;
    info!(
        "{}: {} audio, {} subtitle tracks",
        file.display(),
        audio_tracks.len(),
        subtitle_tracks.len()
    );

    let plan = if options.is_interactive() {
        plan_interactive(&audio_tracks, &subtitle_tracks, input, out)?
    } else {
        plan_from_directives(
            &audio_tracks,
            &subtitle_tracks,
            options.audio.as_deref(),
            options.subtitle.as_ref(),
            out,
        )?
    };
    info!("Plan: {:?}", plan);

    if plan.is_empty() {
        writeln!(out, "Nothing to change.")?;
        return Ok(if options.is_interactive() {
            Outcome::NothingSelected
        } else {
            Outcome::NothingMatched
        });
    }

    if options.dry_run {
        for (kind, action) in plan.pending() {
            writeln!(out, "{}", rewriter.command_line(file, kind, action))?;
        }
        return Ok(Outcome::Applied);
    }

    apply(&plan, options, rewriter, out)
}

/// Run one remux pass per pending kind; a failure does not stop the next pass
fn apply<I: Install, W: Write>(
    plan: &Plan,
    options: &RunOptions,
    rewriter: &DispositionRewriter<I>,
    out: &mut W,
) -> Result<Outcome, AppError> {
    let mut failures = Vec::new();

    for (kind, action) in plan.pending() {
        match rewriter.rewrite(&options.file, kind, action) {
            Ok(()) => match action {
                Action::SetDefault(ordinal) => {
                    writeln!(out, "Default {} track set to #{}.", kind, ordinal + 1)?
                }
                Action::Clear => writeln!(out, "Default {} flags cleared.", kind)?,
            },
            Err(e) => {
                debug!("Rewrite failed: {}", e);
                failures.push(e);
            }
        }
    }

    if failures.is_empty() {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::Failed(failures))
    }
}
