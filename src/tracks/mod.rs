pub mod display;
pub mod selection;

pub use selection::{Action, Plan, SubtitleDirective};

use std::fmt;

/// Language tag used when a stream carries none
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Stream type whose default flag can be changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Subtitle,
}

impl TrackKind {
    /// Stream specifier letter understood by ffprobe and ffmpeg
    pub fn specifier(&self) -> &'static str {
        match self {
            TrackKind::Audio => "a",
            TrackKind::Subtitle => "s",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One audio or subtitle stream of the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Absolute stream index inside the container
    pub stream_index: Option<usize>,
    /// Position among streams of the same kind, used for `-disposition:<kind>:<N>`
    pub ordinal: usize,
    pub codec_name: Option<String>,
    /// Language tag, `und` when the stream has none
    pub language: String,
    pub title: Option<String>,
    pub sample_rate: Option<u32>,
    pub channel_layout: Option<String>,
    pub channels: Option<u16>,
    pub sample_format: Option<String>,
    pub is_default: bool,
}

impl Track {
    /// 1-based number shown to the user
    pub fn display_number(&self) -> usize {
        self.ordinal + 1
    }

    pub fn matches_language(&self, language: &str) -> bool {
        self.language.eq_ignore_ascii_case(language)
    }
}

#[cfg(test)]
pub(crate) fn track(ordinal: usize, language: &str) -> Track {
    Track {
        stream_index: Some(ordinal + 1),
        ordinal,
        codec_name: None,
        language: language.to_string(),
        title: None,
        sample_rate: None,
        channel_layout: None,
        channels: None,
        sample_format: None,
        is_default: false,
    }
}
