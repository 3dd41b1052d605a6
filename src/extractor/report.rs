use crate::catalog::SubtitleStream;
use crate::selection::SelectionReason;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one run, printed at the end in the selected output format.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stream: SubtitleStream,
    pub subtitle_count: usize,
    pub reason: SelectionReason,
    pub replaced_existing: bool,
    pub dry_run: bool,
    pub command: Vec<String>,
    pub extraction_time: DateTime<Utc>,
    pub duration: Duration,
}

impl ExtractionReport {
    /// The ffmpeg invocation as a single shell-like line, for display only.
    pub fn command_line(&self) -> String {
        self.command
            .iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(char::is_whitespace) {
                    format!("\"{}\"", arg)
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
