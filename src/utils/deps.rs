use crate::config::ToolsConfig;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const FFPROBE: &str = "ffprobe";
pub const FFMPEG: &str = "ffmpeg";

/// Resolved locations of the external tools
#[derive(Debug, Clone)]
pub struct Dependencies {
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Dependencies {
    /// Resolve both tools, honouring configured overrides
    pub fn resolve(tools: &ToolsConfig) -> Result<Self, AppError> {
        Ok(Self {
            ffprobe: resolve_one(FFPROBE, tools.ffprobe_path.as_deref())?,
            ffmpeg: resolve_one(FFMPEG, tools.ffmpeg_path.as_deref())?,
        })
    }
}

fn resolve_one(name: &str, custom_path: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = custom_path {
        if is_executable_file(path) {
            return Ok(path.to_path_buf());
        }
        // Custom path is unusable; fall back to PATH.
        warn!(
            "Configured {} path {} is not an executable file, searching PATH",
            name,
            path.display()
        );
    }
    locate(name)
}

/// Find a program on PATH
pub fn locate(name: &str) -> Result<PathBuf, AppError> {
    let not_found = || AppError::NotFound {
        program: name.to_string(),
    };
    let path = which::which(name).map_err(|_| not_found())?;
    if !is_executable_file(&path) {
        return Err(not_found());
    }
    debug!("Found {} at {}", name, path.display());
    Ok(path)
}

/// Regular file with at least one execute bit
fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
