use serde::Deserialize;
use std::path::PathBuf;

/// Explicit locations of the external tools
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Path to ffprobe, searched on PATH when unset
    pub ffprobe_path: Option<PathBuf>,
    /// Path to ffmpeg, searched on PATH when unset
    pub ffmpeg_path: Option<PathBuf>,
}

/// Remux settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemuxConfig {
    /// Refuse to remux when the input's filesystem cannot hold a second copy
    pub check_disk_space: bool,
    /// Extra bytes that must stay free after the copy is written
    pub free_space_margin: u64,
}

impl Default for RemuxConfig {
    fn default() -> Self {
        Self {
            check_disk_space: true,
            free_space_margin: 0,
        }
    }
}

impl RemuxConfig {
    /// Free-space margin to enforce, or `None` when the check is off
    pub fn space_margin(&self) -> Option<u64> {
        self.check_disk_space.then_some(self.free_space_margin)
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a daily debug log under the data directory
    pub debug_file: bool,
}
