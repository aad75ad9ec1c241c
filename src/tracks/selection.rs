use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use super::display::listing_line;
use super::{Track, TrackKind};

/// Literal directive value that clears every subtitle default flag
pub const CLEAR_SENTINEL: &str = "0";

/// Change to apply to the default flags of one track kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Mark the track at this per-kind ordinal as the only default
    SetDefault(usize),
    /// Remove the default flag from every track of the kind
    Clear,
}

/// Per-kind decisions computed once per run. `None` means no action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plan {
    pub audio: Option<Action>,
    pub subtitle: Option<Action>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.audio.is_none() && self.subtitle.is_none()
    }

    /// Pending actions, audio first
    pub fn pending(&self) -> impl Iterator<Item = (TrackKind, Action)> {
        [
            self.audio.map(|a| (TrackKind::Audio, a)),
            self.subtitle.map(|a| (TrackKind::Subtitle, a)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Subtitle directive from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleDirective {
    Clear,
    Language(String),
}

impl SubtitleDirective {
    pub fn parse(value: &str) -> Self {
        if value == CLEAR_SENTINEL {
            SubtitleDirective::Clear
        } else {
            SubtitleDirective::Language(value.to_string())
        }
    }
}

/// Ordinal of the first track whose language matches, ignoring case
pub fn first_matching(tracks: &[Track], language: &str) -> Option<usize> {
    tracks
        .iter()
        .find(|t| t.matches_language(language))
        .map(|t| t.ordinal)
}

/// Build the plan from command line directives. Kinds without a directive get no action.
pub fn plan_from_directives<W: Write>(
    audio_tracks: &[Track],
    subtitle_tracks: &[Track],
    audio: Option<&str>,
    subtitle: Option<&SubtitleDirective>,
    out: &mut W,
) -> io::Result<Plan> {
    let audio = match audio {
        Some(language) => match_language(TrackKind::Audio, audio_tracks, language, out)?,
        None => None,
    };

    let subtitle = match subtitle {
        Some(SubtitleDirective::Clear) if subtitle_tracks.is_empty() => {
            writeln!(out, "No subtitle tracks to clear.")?;
            info!("Clear requested but the file has no subtitle tracks");
            None
        }
        Some(SubtitleDirective::Clear) => Some(Action::Clear),
        Some(SubtitleDirective::Language(language)) => {
            match_language(TrackKind::Subtitle, subtitle_tracks, language, out)?
        }
        None => None,
    };

    Ok(Plan { audio, subtitle })
}

fn match_language<W: Write>(
    kind: TrackKind,
    tracks: &[Track],
    language: &str,
    out: &mut W,
) -> io::Result<Option<Action>> {
    match first_matching(tracks, language) {
        Some(ordinal) => {
            debug!("Matched {} language {} at ordinal {}", kind, language, ordinal);
            Ok(Some(Action::SetDefault(ordinal)))
        }
        None => {
            writeln!(
                out,
                "No {} track with language '{}' found, leaving {} tracks unchanged.",
                kind, language, kind
            )?;
            info!("No {} track matches language {}", kind, language);
            Ok(None)
        }
    }
}

/// Outcome of parsing one line of interactive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Skip,
    Invalid,
    Apply(Action),
}

fn parse_choice(kind: TrackKind, line: &str, count: usize) -> Choice {
    let line = line.trim();
    if line.is_empty() {
        return Choice::Skip;
    }
    match line.parse::<usize>() {
        Ok(0) if kind == TrackKind::Subtitle => Choice::Apply(Action::Clear),
        Ok(n) if (1..=count).contains(&n) => Choice::Apply(Action::SetDefault(n - 1)),
        _ => Choice::Invalid,
    }
}

/// List the tracks of each kind and ask the user for the new defaults
pub fn plan_interactive<R: BufRead, W: Write>(
    audio_tracks: &[Track],
    subtitle_tracks: &[Track],
    input: &mut R,
    out: &mut W,
) -> io::Result<Plan> {
    Ok(Plan {
        audio: prompt_kind(TrackKind::Audio, audio_tracks, input, out)?,
        subtitle: prompt_kind(TrackKind::Subtitle, subtitle_tracks, input, out)?,
    })
}

fn prompt_kind<R: BufRead, W: Write>(
    kind: TrackKind,
    tracks: &[Track],
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Action>> {
    if tracks.is_empty() {
        writeln!(out, "No {} tracks found.", kind)?;
        return Ok(None);
    }

    writeln!(out, "{} tracks:", capitalize(kind.label()))?;
    for track in tracks {
        writeln!(out, "{}", listing_line(kind, track))?;
    }

    match kind {
        TrackKind::Audio => write!(
            out,
            "Select default audio track [1-{}] (Enter to skip): ",
            tracks.len()
        )?,
        TrackKind::Subtitle => write!(
            out,
            "Select default subtitle track [1-{}], 0 to clear (Enter to skip): ",
            tracks.len()
        )?,
    }
    out.flush()?;

    // EOF reads as an empty line, undecodable bytes as an invalid choice
    let mut raw = Vec::new();
    input.read_until(b'\n', &mut raw)?;
    let line = String::from_utf8_lossy(&raw);

    match parse_choice(kind, &line, tracks.len()) {
        Choice::Skip => {
            writeln!(out, "Leaving {} tracks unchanged.", kind)?;
            Ok(None)
        }
        Choice::Invalid => {
            writeln!(
                out,
                "Invalid selection '{}', leaving {} tracks unchanged.",
                line.trim(),
                kind
            )?;
            warn!("Invalid {} selection: {:?}", kind, line.trim());
            Ok(None)
        }
        Choice::Apply(action) => Ok(Some(action)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::track;
    use std::io::Cursor;

    fn run_interactive(audio: &[Track], subs: &[Track], input: &str) -> (Plan, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let plan = plan_interactive(audio, subs, &mut reader, &mut out).unwrap();
        (plan, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_first_match_is_case_insensitive() {
        let tracks = vec![track(0, "ENG"), track(1, "eng")];
        assert_eq!(first_matching(&tracks, "eng"), Some(0));
        assert_eq!(first_matching(&tracks, "Eng"), Some(0));
        assert_eq!(first_matching(&tracks, "ger"), None);
    }

    #[test]
    fn test_directive_selects_first_match_in_ordinal_order() {
        let audio = vec![track(0, "jpn"), track(1, "eng"), track(2, "eng")];
        let subs = vec![track(0, "eng"), track(1, "spa")];
        let mut out = Vec::new();
        let plan = plan_from_directives(
            &audio,
            &subs,
            Some("eng"),
            Some(&SubtitleDirective::Language("SPA".to_string())),
            &mut out,
        )
        .unwrap();
        assert_eq!(plan.audio, Some(Action::SetDefault(1)));
        assert_eq!(plan.subtitle, Some(Action::SetDefault(1)));
    }

    #[test]
    fn test_directive_without_match_is_no_action() {
        let audio = vec![track(0, "jpn")];
        let mut out = Vec::new();
        let plan = plan_from_directives(&audio, &[], Some("eng"), None, &mut out).unwrap();
        assert!(plan.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("No audio track"));
    }

    #[test]
    fn test_omitted_kind_gets_no_action() {
        let audio = vec![track(0, "eng")];
        let subs = vec![track(0, "eng")];
        let mut out = Vec::new();
        let plan = plan_from_directives(&audio, &subs, Some("eng"), None, &mut out).unwrap();
        assert_eq!(plan.audio, Some(Action::SetDefault(0)));
        assert_eq!(plan.subtitle, None);
    }

    #[test]
    fn test_clear_sentinel() {
        assert_eq!(SubtitleDirective::parse("0"), SubtitleDirective::Clear);
        assert_eq!(
            SubtitleDirective::parse("eng"),
            SubtitleDirective::Language("eng".to_string())
        );

        let subs = vec![track(0, "eng")];
        let mut out = Vec::new();
        let clear = SubtitleDirective::Clear;
        let plan = plan_from_directives(&[], &subs, None, Some(&clear), &mut out).unwrap();
        assert_eq!(plan.subtitle, Some(Action::Clear));
    }

    #[test]
    fn test_clear_without_subtitles_is_no_action() {
        let mut out = Vec::new();
        let clear = SubtitleDirective::Clear;
        let plan = plan_from_directives(&[], &[], None, Some(&clear), &mut out).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_audio_zero_is_a_language() {
        let audio = vec![track(0, "eng")];
        let mut out = Vec::new();
        let plan = plan_from_directives(&audio, &[], Some("0"), None, &mut out).unwrap();
        assert_eq!(plan.audio, None);
    }

    #[test]
    fn test_parse_choice() {
        use Choice::{Apply, Invalid, Skip};
        let audio = |line| parse_choice(TrackKind::Audio, line, 3);
        let subtitle = |line| parse_choice(TrackKind::Subtitle, line, 3);

        assert_eq!(audio("\n"), Skip);
        assert_eq!(audio(" 2 \n"), Apply(Action::SetDefault(1)));
        assert_eq!(audio("0"), Invalid);
        assert_eq!(audio("4"), Invalid);
        assert_eq!(audio("two"), Invalid);
        assert_eq!(subtitle("0"), Apply(Action::Clear));
        assert_eq!(subtitle("3"), Apply(Action::SetDefault(2)));
        assert_eq!(subtitle("-1"), Invalid);
    }

    #[test]
    fn test_interactive_blank_input_plans_nothing() {
        let audio = vec![track(0, "eng"), track(1, "jpn")];
        let subs = vec![track(0, "eng")];
        let (plan, _) = run_interactive(&audio, &subs, "\n\n");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_interactive_selection() {
        let audio = vec![track(0, "eng"), track(1, "jpn")];
        let subs = vec![track(0, "eng")];
        let (plan, output) = run_interactive(&audio, &subs, "2\n0\n");
        assert_eq!(plan.audio, Some(Action::SetDefault(1)));
        assert_eq!(plan.subtitle, Some(Action::Clear));
        assert!(output.contains("Audio tracks:"));
        assert!(output.contains("  2. [jpn]"));
    }

    #[test]
    fn test_interactive_invalid_input_does_not_abort() {
        let audio = vec![track(0, "eng")];
        let subs = vec![track(0, "eng"), track(1, "fre")];
        let (plan, output) = run_interactive(&audio, &subs, "9\n2\n");
        assert_eq!(plan.audio, None);
        assert_eq!(plan.subtitle, Some(Action::SetDefault(1)));
        assert!(output.contains("Invalid selection '9'"));
    }

    #[test]
    fn test_interactive_skips_empty_kind_without_reading() {
        let subs = vec![track(0, "eng")];
        let (plan, output) = run_interactive(&[], &subs, "1\n");
        assert_eq!(plan.audio, None);
        assert_eq!(plan.subtitle, Some(Action::SetDefault(0)));
        assert!(output.contains("No audio tracks found."));
    }

    #[test]
    fn test_interactive_undecodable_line_is_invalid() {
        let audio = vec![track(0, "eng")];
        let subs = vec![track(0, "eng"), track(1, "fre")];
        let mut reader = Cursor::new(b"\xff\xfe\n2\n".to_vec());
        let mut out = Vec::new();
        let plan = plan_interactive(&audio, &subs, &mut reader, &mut out).unwrap();
        assert_eq!(plan.audio, None);
        assert_eq!(plan.subtitle, Some(Action::SetDefault(1)));
        assert!(String::from_utf8_lossy(&out).contains("Invalid selection"));
    }

    #[test]
    fn test_interactive_eof_is_skip() {
        let audio = vec![track(0, "eng")];
        let (plan, _) = run_interactive(&audio, &[], "");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_pending_order() {
        let plan = Plan {
            audio: Some(Action::SetDefault(0)),
            subtitle: Some(Action::Clear),
        };
        let pending: Vec<_> = plan.pending().collect();
        assert_eq!(
            pending,
            vec![
                (TrackKind::Audio, Action::SetDefault(0)),
                (TrackKind::Subtitle, Action::Clear)
            ]
        );
    }
}
