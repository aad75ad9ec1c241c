use crate::tracks::{Action, TrackKind};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Build FFmpeg arguments that copy every stream and rewrite the default flags of one kind
pub fn build_disposition_args(
    input: &Path,
    output: &Path,
    kind: TrackKind,
    action: Action,
) -> Vec<OsString> {
    let letter = kind.specifier();
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-map".into(),
        "0".into(),
        "-c".into(),
        "copy".into(),
    ];

    // Clear the flag on every stream of the kind first
    args.push(format!("-disposition:{}", letter).into());
    args.push("0".into());

    if let Action::SetDefault(ordinal) = action {
        args.push(format!("-disposition:{}:{}", letter, ordinal).into());
        args.push("default".into());
    }

    args.push(output.as_os_str().to_owned());
    args
}

/// Render a command line for display, quoting arguments that need it
pub fn display_command(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@".contains(c));
    if plain {
        arg.into_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_set_default_audio() {
        let args = build_disposition_args(
            Path::new("movie.mkv"),
            Path::new(".tmp.mkv"),
            TrackKind::Audio,
            Action::SetDefault(2),
        );
        assert_eq!(
            strings(&args),
            vec![
                "-y", "-i", "movie.mkv", "-map", "0", "-c", "copy", "-disposition:a", "0",
                "-disposition:a:2", "default", ".tmp.mkv"
            ]
        );
    }

    #[test]
    fn test_clear_subtitles() {
        let args = build_disposition_args(
            Path::new("movie.mkv"),
            Path::new(".tmp.mkv"),
            TrackKind::Subtitle,
            Action::Clear,
        );
        assert_eq!(
            strings(&args),
            vec![
                "-y", "-i", "movie.mkv", "-map", "0", "-c", "copy", "-disposition:s", "0",
                ".tmp.mkv"
            ]
        );
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        let args = build_disposition_args(
            Path::new("My Movie.mkv"),
            Path::new("out.mkv"),
            TrackKind::Subtitle,
            Action::SetDefault(0),
        );
        let line = display_command(Path::new("/usr/bin/ffmpeg"), &args);
        assert_eq!(
            line,
            "/usr/bin/ffmpeg -y -i 'My Movie.mkv' -map 0 -c copy -disposition:s 0 \
             -disposition:s:0 default out.mkv"
        );
    }
}
