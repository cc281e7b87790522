use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "daedalus.toml";
const ENV_PREFIX: &str = "DAEDALUS__";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
    pub font_size: f32,
    pub command_queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            window_width: 900.0,
            window_height: 640.0,
            font_size: 14.0,
            command_queue_capacity: 256,
        }
    }
}

/// Every key is optional; anything missing keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    log_filter: Option<String>,
    window_width: Option<f32>,
    window_height: Option<f32>,
    font_size: Option<f32>,
    command_queue_capacity: Option<usize>,
}

impl Settings {
    fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file.window_width {
            self.window_width = v;
        }
        if let Some(v) = file.window_height {
            self.window_height = v;
        }
        if let Some(v) = file.font_size {
            self.font_size = v;
        }
        if let Some(v) = file.command_queue_capacity {
            self.command_queue_capacity = v;
        }
    }

    /// Applies `DAEDALUS__*` overrides. Values that fail to parse are
    /// skipped and described in `warnings`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
        warnings: &mut Vec<String>,
    ) {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        if let Some(v) = var("LOG_FILTER") {
            self.log_filter = v;
        }
        if let Some(v) = parse_var("WINDOW_WIDTH", var("WINDOW_WIDTH"), warnings) {
            self.window_width = v;
        }
        if let Some(v) = parse_var("WINDOW_HEIGHT", var("WINDOW_HEIGHT"), warnings) {
            self.window_height = v;
        }
        if let Some(v) = parse_var("FONT_SIZE", var("FONT_SIZE"), warnings) {
            self.font_size = v;
        }
        if let Some(v) =
            parse_var("COMMAND_QUEUE_CAPACITY", var("COMMAND_QUEUE_CAPACITY"), warnings)
        {
            self.command_queue_capacity = v;
        }
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.command_queue_capacity == 0 {
            bail!("command_queue_capacity must be at least 1");
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            bail!("font_size must be a positive number, got {}", self.font_size);
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("ignoring {ENV_PREFIX}{key}={raw:?}: not a valid value"));
            None
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("daedalus").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicitly requested file must exist; the implicit locations
/// (`./daedalus.toml`, then the user config dir) are optional. Skipped
/// overrides come back as warnings because logging is not set up yet.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<(Settings, Vec<String>)> {
    let mut settings = Settings::default();

    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };
    if let Some(path) = path {
        settings.apply_file(read_file_settings(&path)?);
    }

    let mut warnings = Vec::new();
    settings.apply_env_overrides(|name| std::env::var(name).ok(), &mut warnings);
    Ok((settings.validate()?, warnings))
}
