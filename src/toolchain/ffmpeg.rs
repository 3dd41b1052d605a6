use crate::catalog::Catalog;
use crate::config::ToolsConfig;
use crate::error::{Result, SubExtractError};
use crate::extractor::OutputTarget;
use crate::toolchain::command::{extraction_command, probe_command};
use crate::toolchain::{MediaToolchain, ToolCommand};
use std::io;
use std::path::Path;
use std::process::{Output, Stdio};

/// Runs the `ffprobe` / `ffmpeg` binaries as blocking subprocesses.
pub struct FfmpegToolchain {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegToolchain {
    pub fn new<S: Into<String>>(ffmpeg: S, ffprobe: S) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.ffmpeg.clone(), tools.ffprobe.clone())
    }

    fn check_tool(&self, tool: &str) -> Result<()> {
        let status = ToolCommand::new(tool)
            .arg("-version")
            .to_command()
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SubExtractError::ToolUnavailable {
                tool: tool.to_string(),
            }),
            Err(e) => Err(SubExtractError::Io(e)),
        }
    }

    fn run(&self, command: &ToolCommand) -> Result<Output> {
        tracing::debug!(command = ?command.to_display_vec(), "running");

        command.to_command().output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SubExtractError::ToolUnavailable {
                    tool: command.program().to_string_lossy().into_owned(),
                }
            } else {
                SubExtractError::Io(e)
            }
        })
    }
}

impl MediaToolchain for FfmpegToolchain {
    fn check_available(&self) -> Result<()> {
        self.check_tool(&self.ffmpeg)?;
        self.check_tool(&self.ffprobe)
    }

    fn probe(&self, input: &Path) -> Result<Catalog> {
        let output = self.run(&probe_command(&self.ffprobe, input))?;

        if !output.status.success() {
            return Err(SubExtractError::ProbeFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let catalog = Catalog::from_probe_output(&output.stdout)?;
        tracing::debug!(count = catalog.len(), "probed subtitle streams");
        Ok(catalog)
    }

    fn extraction_command(&self, input: &Path, stream: usize, target: &OutputTarget) -> ToolCommand {
        extraction_command(&self.ffmpeg, input, stream, target)
    }

    fn extract(&self, input: &Path, stream: usize, target: &OutputTarget) -> Result<()> {
        let output = self.run(&self.extraction_command(input, stream, target))?;

        if !output.status.success() {
            return Err(SubExtractError::ExtractionFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
