use crate::error::AppError;
use crate::tracks::{Track, TrackKind, UNDETERMINED_LANGUAGE};
use crate::utils::process;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// List the tracks of one kind in a media file using ffprobe
pub fn inspect(ffprobe: &Path, input: &Path, kind: TrackKind) -> Result<Vec<Track>, AppError> {
    let args: [&OsStr; 8] = [
        "-v".as_ref(),
        "quiet".as_ref(),
        "-print_format".as_ref(),
        "json".as_ref(),
        "-show_streams".as_ref(),
        "-select_streams".as_ref(),
        kind.specifier().as_ref(),
        input.as_os_str(),
    ];

    let output = process::run(ffprobe, args)?;
    if !output.success() {
        return Err(AppError::Inspection(format!(
            "ffprobe failed on {}: {}",
            input.display(),
            output.failure_summary()
        )));
    }

    let tracks = parse_tracks(&output.stdout, kind)?;
    debug!("Found {} {} tracks in {}", tracks.len(), kind, input.display());
    for track in &tracks {
        debug!(
            "{} #{} is stream {:?} [{}]",
            kind,
            track.display_number(),
            track.stream_index,
            track.language
        );
    }
    Ok(tracks)
}

/// Decode ffprobe JSON into tracks, numbering them in output order
pub fn parse_tracks(json: &str, kind: TrackKind) -> Result<Vec<Track>, AppError> {
    let data: FfprobeOutput = serde_json::from_str(json).map_err(|e| {
        AppError::Inspection(format!("Failed to parse ffprobe {} output: {}", kind, e))
    })?;

    let tracks = data
        .streams
        .into_iter()
        .enumerate()
        .map(|(ordinal, stream)| {
            let is_audio = kind == TrackKind::Audio;
            Track {
                stream_index: stream.index,
                ordinal,
                codec_name: stream.codec_name,
                language: stream
                    .tags
                    .language
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_string()),
                title: stream.tags.title,
                sample_rate: stream
                    .sample_rate
                    .filter(|_| is_audio)
                    .and_then(|s| s.parse::<u32>().ok()),
                channel_layout: stream.channel_layout.filter(|_| is_audio),
                channels: stream.channels.filter(|_| is_audio),
                sample_format: stream.sample_fmt.filter(|_| is_audio),
                is_default: stream.disposition.default == 1,
            }
        })
        .collect();

    Ok(tracks)
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    index: Option<usize>,
    codec_name: Option<String>,
    sample_fmt: Option<String>,
    sample_rate: Option<String>,
    channel_layout: Option<String>,
    channels: Option<u16>,
    #[serde(default)]
    tags: StreamTags,
    #[serde(default)]
    disposition: Disposition,
}

#[derive(Debug, Default, Deserialize)]
struct StreamTags {
    language: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Disposition {
    #[serde(default)]
    default: u8,
}
