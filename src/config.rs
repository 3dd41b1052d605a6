use crate::error::{Result, SubExtractError};
use crate::extractor::{normalize_extension, DEFAULT_EXTENSION};
use crate::selection::AutoPreferences;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub selection: AutoPreferences,
    pub output: OutputConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SubExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SubExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SubExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["subextract.toml", ".subextract.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref ffmpeg) = cli_args.ffmpeg {
            self.tools.ffmpeg = ffmpeg.clone();
        }

        if let Some(ref ffprobe) = cli_args.ffprobe {
            self.tools.ffprobe = ffprobe.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        normalize_extension(&self.output.default_extension)?;

        if self.tools.ffmpeg.trim().is_empty() || self.tools.ffprobe.trim().is_empty() {
            return Err(SubExtractError::Config {
                message: "Tool paths for ffmpeg and ffprobe must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
}

impl CliOverrides {
    pub fn with_ffmpeg(mut self, ffmpeg: Option<String>) -> Self {
        self.ffmpeg = ffmpeg;
        self
    }

    pub fn with_ffprobe(mut self, ffprobe: Option<String>) -> Self {
        self.ffprobe = ffprobe;
        self
    }
}
