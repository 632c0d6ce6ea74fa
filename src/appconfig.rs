use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, ensure, Context, Result};
use tracing::{debug, error, info, trace, warn};

use serde::{Deserialize, Serialize};

use crate::{overlay::PolygonPolicy, ui::DisplaySettings, viewer::ErrorPolicy};

pub const DEFAULT_ANNOTATION_FILE: &str = "result.json";
pub const DEFAULT_CONFIG_FILE: &str = "coco_viewer.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub annotation_file: PathBuf,
    pub image_root: Option<PathBuf>,
    pub polygon_policy: PolygonPolicy,
    pub error_policy: ErrorPolicy,
    pub log_file: Option<PathBuf>,
    pub display: DisplaySettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            annotation_file: PathBuf::from(DEFAULT_ANNOTATION_FILE),
            image_root: None,
            polygon_policy: PolygonPolicy::default(),
            error_policy: ErrorPolicy::default(),
            log_file: None,
            display: DisplaySettings::default(),
        }
    }
}

impl AppSettings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let settings: AppSettings = toml::from_str(&s)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path` if given, otherwise the default config file when one
    /// exists in the working directory, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = toml::to_string_pretty(self).context("Failed to serialize AppSettings to TOML")?;
        std::fs::write(path, s)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let [w, h] = self.display.window_size;
        ensure!(
            w > 0.0 && h > 0.0,
            "window_size must be positive, got {}x{}",
            w,
            h
        );
        ensure!(
            self.display.stroke_width > 0.0,
            "stroke_width must be positive, got {}",
            self.display.stroke_width
        );
        Ok(())
    }
}
