use super::{Track, TrackKind};

const NOT_AVAILABLE: &str = "N/A";

/// Render one numbered listing line for a track
pub fn listing_line(kind: TrackKind, track: &Track) -> String {
    let default_marker = if track.is_default { " (default)" } else { "" };
    let details = match kind {
        TrackKind::Audio => audio_details(track),
        TrackKind::Subtitle => subtitle_details(track),
    };
    format!(
        "  {}. [{}] {}{}",
        track.display_number(),
        track.language,
        details,
        default_marker
    )
}

fn audio_details(track: &Track) -> String {
    let codec = or_na(track.codec_name.as_deref());
    let sample_rate = track
        .sample_rate
        .map(|s| format!("{} Hz", s))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let layout = channels_string(track);
    let sample_format = or_na(track.sample_format.as_deref());
    format!("{}, {}, {}, {}", codec, sample_rate, layout, sample_format)
}

fn subtitle_details(track: &Track) -> String {
    let codec = or_na(track.codec_name.as_deref());
    match track.title.as_deref() {
        Some(title) => format!("{} - {}", codec, title),
        None => codec.to_string(),
    }
}

/// Prefer the named layout, fall back to the raw channel count
fn channels_string(track: &Track) -> String {
    if let Some(layout) = &track.channel_layout {
        return layout.clone();
    }
    match track.channels {
        Some(1) => "mono".to_string(),
        Some(2) => "stereo".to_string(),
        Some(n) => format!("{} channels", n),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}
