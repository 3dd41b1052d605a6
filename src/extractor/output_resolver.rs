use crate::error::{Result, SubExtractError};
use crate::ui::Prompter;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "srt";

/// Where the subtitle is written and whether an existing file there may be
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub overwrite_allowed: bool,
}

pub struct OutputResolver {
    default_extension: String,
    force_overwrite: bool,
}

impl OutputResolver {
    pub fn new<S: Into<String>>(default_extension: S) -> Self {
        Self {
            default_extension: default_extension.into(),
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Destination before any conflict handling.
    ///
    /// An explicit output path is used verbatim. Otherwise the input's last
    /// extension is replaced by `extension` (or the default), so
    /// `/a/b/movie.mkv` becomes `/a/b/movie.srt`.
    pub fn candidate_path(
        &self,
        input: &Path,
        extension: Option<&str>,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        if let Some(output) = output {
            return Ok(output.to_path_buf());
        }

        let extension = normalize_extension(extension.unwrap_or(&self.default_extension))?;
        Ok(input.with_extension(extension))
    }

    /// Decide whether writing to `candidate` may proceed.
    ///
    /// Fails with `OutputConflictDenied` when the file exists, overwrite is
    /// not forced and the user declines.
    pub fn resolve<R: BufRead, W: Write>(
        &self,
        candidate: PathBuf,
        prompter: &mut Prompter<R, W>,
    ) -> Result<OutputTarget> {
        if !candidate.exists() {
            return Ok(OutputTarget {
                path: candidate,
                overwrite_allowed: self.force_overwrite,
            });
        }

        if self.force_overwrite {
            tracing::debug!(path = %candidate.display(), "overwriting existing output");
            return Ok(OutputTarget {
                path: candidate,
                overwrite_allowed: true,
            });
        }

        if prompter.confirm_overwrite(&candidate)? {
            Ok(OutputTarget {
                path: candidate,
                overwrite_allowed: true,
            })
        } else {
            Err(SubExtractError::OutputConflictDenied {
                path: candidate.display().to_string(),
            })
        }
    }

    /// Target used by dry runs: never prompts, only reflects `--overwrite`.
    pub fn preview(&self, candidate: PathBuf) -> OutputTarget {
        OutputTarget {
            path: candidate,
            overwrite_allowed: self.force_overwrite,
        }
    }
}

/// Strip a single leading dot; `.vtt` and `vtt` are the same extension.
pub fn normalize_extension(extension: &str) -> Result<String> {
    let trimmed = extension.strip_prefix('.').unwrap_or(extension);

    if trimmed.is_empty() {
        return Err(SubExtractError::Config {
            message: format!("Invalid subtitle extension: '{}'", extension),
        });
    }

    Ok(trimmed.to_string())
}
