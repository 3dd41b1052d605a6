//! External media toolchain.
//!
//! Probing and extraction go through [`MediaToolchain`] so the pipeline can
//! run against a fake in tests; [`FfmpegToolchain`] is the real
//! implementation backed by the `ffprobe` and `ffmpeg` binaries.

pub mod command;
pub mod ffmpeg;

pub use command::ToolCommand;
pub use ffmpeg::FfmpegToolchain;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::extractor::OutputTarget;
use std::path::Path;

pub trait MediaToolchain {
    /// Fail with `ToolUnavailable` if any required binary cannot be run.
    fn check_available(&self) -> Result<()>;

    /// List the subtitle streams of `input`.
    fn probe(&self, input: &Path) -> Result<Catalog>;

    /// The command `extract` would run, without running it.
    fn extraction_command(&self, input: &Path, stream: usize, target: &OutputTarget)
        -> ToolCommand;

    /// Write subtitle stream `stream` (0-based among subtitle streams) of
    /// `input` to `target`.
    fn extract(&self, input: &Path, stream: usize, target: &OutputTarget) -> Result<()>;
}
