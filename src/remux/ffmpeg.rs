use crate::error::AppError;
use crate::remux::command_builder::{build_disposition_args, display_command};
use crate::tracks::{Action, TrackKind};
use crate::utils::{disk_space, process};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Moves a finished remux over the original file
pub trait Install {
    fn install(&self, remuxed: NamedTempFile, target: &Path) -> io::Result<()>;
}

/// Same-directory rename, so the target is either the old or the new file
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicReplace;

impl Install for AtomicReplace {
    fn install(&self, remuxed: NamedTempFile, target: &Path) -> io::Result<()> {
        // On failure the returned temp file is dropped, which deletes it
        remuxed.persist(target).map(|_| ()).map_err(|e| e.error)
    }
}

/// Rewrites default disposition flags with one ffmpeg pass per track kind
#[derive(Debug, Clone)]
pub struct DispositionRewriter<I = AtomicReplace> {
    ffmpeg: PathBuf,
    /// Bytes to keep free beyond the size of the copy; `None` skips the check
    space_margin: Option<u64>,
    installer: I,
}

impl DispositionRewriter {
    pub fn new(ffmpeg: PathBuf, space_margin: Option<u64>) -> Self {
        Self::with_installer(ffmpeg, space_margin, AtomicReplace)
    }
}

impl<I: Install> DispositionRewriter<I> {
    pub fn with_installer(ffmpeg: PathBuf, space_margin: Option<u64>, installer: I) -> Self {
        Self {
            ffmpeg,
            space_margin,
            installer,
        }
    }

    /// The ffmpeg command line a rewrite would run, with a placeholder output
    pub fn command_line(&self, input: &Path, kind: TrackKind, action: Action) -> String {
        let output = temp_dir_for(input).join(format!(".changelang-XXXXXX{}", suffix_for(input)));
        let args = build_disposition_args(input, &output, kind, action);
        display_command(&self.ffmpeg, &args)
    }

    /// Remux `input` into a sibling temp file and replace the original on success
    pub fn rewrite(&self, input: &Path, kind: TrackKind, action: Action) -> Result<(), AppError> {
        let rewrite_error = |message: String| AppError::Rewrite { kind, message };

        // Work on the link target so the real file is replaced, from its own directory
        let resolved = std::fs::canonicalize(input).map_err(|e| {
            rewrite_error(format!("cannot resolve {}: {}", input.display(), e))
        })?;
        let input = resolved.as_path();
        let dir = temp_dir_for(input);

        if let Some(margin) = self.space_margin {
            let required = std::fs::metadata(input)
                .map(|m| m.len())
                .unwrap_or(0)
                .saturating_add(margin);
            if !disk_space::has_enough_space(dir, required) {
                return Err(rewrite_error(format!(
                    "not enough free space in {} for a remuxed copy",
                    dir.display()
                )));
            }
        }

        // The temp file is removed on drop unless it is installed
        let remuxed = tempfile::Builder::new()
            .prefix(".changelang-")
            .suffix(&suffix_for(input))
            .tempfile_in(dir)
            .map_err(|e| rewrite_error(format!("failed to create temporary file: {}", e)))?;

        let args = build_disposition_args(input, remuxed.path(), kind, action);
        info!(
            "Remuxing {} ({} {:?}) via {}",
            input.display(),
            kind,
            action,
            remuxed.path().display()
        );

        let output = process::run(&self.ffmpeg, &args)?;
        if !output.success() {
            return Err(rewrite_error(format!(
                "ffmpeg failed: {}",
                output.failure_summary()
            )));
        }

        let install_error = |source: io::Error| AppError::Install {
            kind,
            path: input.to_path_buf(),
            source,
        };

        // Keep the original file's mode instead of the temp file's private one
        let permissions = std::fs::metadata(input).map_err(install_error)?.permissions();
        std::fs::set_permissions(remuxed.path(), permissions).map_err(install_error)?;

        self.installer
            .install(remuxed, input)
            .map_err(install_error)?;

        debug!("Replaced {}", input.display());
        Ok(())
    }
}

fn temp_dir_for(input: &Path) -> &Path {
    match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Keep the extension so ffmpeg picks the same container format
fn suffix_for(input: &Path) -> String {
    input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
