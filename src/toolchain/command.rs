use crate::extractor::OutputTarget;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

/// A program plus its arguments, kept as data until it is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Program and arguments as lossy strings, for logs and reports.
    pub fn to_display_vec(&self) -> Vec<String> {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    /// Build the process with stdin detached so the tool can never block on
    /// a question of its own.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        command
    }
}

/// `ffprobe` listing only subtitle streams with their language and title
/// tags, as JSON.
pub fn probe_command<S: AsRef<OsStr>>(ffprobe: S, input: &Path) -> ToolCommand {
    ToolCommand::new(ffprobe)
        .args([
            "-loglevel",
            "error",
            "-select_streams",
            "s",
            "-show_entries",
            "stream=index:stream_tags=language:stream_tags=title",
            "-print_format",
            "json",
        ])
        .arg(input)
}

/// `ffmpeg` mapping the `stream`-th subtitle stream to the target path.
///
/// `-y` is only passed when overwriting is allowed; otherwise `-n` makes
/// ffmpeg refuse to touch an existing file.
pub fn extraction_command<S: AsRef<OsStr>>(
    ffmpeg: S,
    input: &Path,
    stream: usize,
    target: &OutputTarget,
) -> ToolCommand {
    let clobber = if target.overwrite_allowed { "-y" } else { "-n" };

    ToolCommand::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", clobber, "-i"])
        .arg(input)
        .arg("-map")
        .arg(format!("0:s:{}", stream))
        .arg(&target.path)
}
