use crate::error::AppError;
use crate::tracks::SubtitleDirective;
use clap::Parser;
use std::path::PathBuf;

/// Change the default audio and subtitle tracks of a media file without re-encoding.
///
/// Without -a or -s the tracks are listed and the new defaults are asked for.
#[derive(Parser, Debug)]
#[command(name = "changelang", version)]
pub struct Cli {
    /// Media file to edit in place
    pub file: PathBuf,

    /// Make the first audio track in this language the default (e.g. eng)
    #[arg(short = 'a', long = "audio", value_name = "LANG", value_parser = non_empty)]
    pub audio: Option<String>,

    /// Make the first subtitle track in this language the default, or 0 to clear all
    #[arg(short = 's', long = "subtitle", value_name = "LANG|0", value_parser = non_empty)]
    pub subtitle: Option<String>,

    /// Show the ffmpeg commands that would run without changing the file
    #[arg(long)]
    pub dry_run: bool,
}

fn non_empty(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Validated options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub file: PathBuf,
    pub audio: Option<String>,
    pub subtitle: Option<SubtitleDirective>,
    pub dry_run: bool,
}

impl RunOptions {
    /// Interactive mode is used only when no directive was given
    pub fn is_interactive(&self) -> bool {
        self.audio.is_none() && self.subtitle.is_none()
    }
}

impl TryFrom<Cli> for RunOptions {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.file.as_os_str().is_empty() {
            return Err(AppError::Usage("a media file path is required".to_string()));
        }
        if !cli.file.is_file() {
            return Err(AppError::InputMissing(cli.file));
        }

        Ok(Self {
            file: cli.file,
            audio: cli.audio,
            subtitle: cli.subtitle.as_deref().map(SubtitleDirective::parse),
            dry_run: cli.dry_run,
        })
    }
}
