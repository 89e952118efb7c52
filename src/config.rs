use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// The subset of a player setup object this crate cares about. Other keys
/// (`file`, `subtitles`, `live`, ...) are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewConfig {
    /// Cue sheet describing the sprite regions.
    #[serde(default)]
    pub vtt: Option<String>,
    /// The sprite image itself.
    #[serde(default)]
    pub image: Option<String>,
}

impl PreviewConfig {
    /// The cue sheet location, if scrub previews are switched on. That
    /// takes both a sheet and an image.
    pub fn source(&self) -> Option<&str> {
        let vtt = self.vtt.as_deref().filter(|s| !s.is_empty())?;
        self.image.as_deref().filter(|s| !s.is_empty())?;
        Some(vtt)
    }
}

impl PlayerConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: '{}'", path.display()))?;
        Self::from_json(&data).context(format!("Invalid config file: '{}'", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn preview_source(&self) -> Option<&str> {
        self.preview.as_ref().and_then(PreviewConfig::source)
    }
}
