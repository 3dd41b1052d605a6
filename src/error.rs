use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubExtractError {
    #[error("Required tool not found: {tool}")]
    ToolUnavailable { tool: String },

    #[error("No input file given")]
    NoInput,

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Output file exists and overwrite was not allowed: {path}")]
    OutputConflictDenied { path: String },

    #[error("ffprobe failed with {}", describe_exit(.code))]
    ProbeFailed { code: Option<i32>, stderr: String },

    #[error("Probe output is not valid stream data: {message}")]
    MalformedProbeData { message: String },

    #[error("Input file has no embedded subtitles")]
    NoSubtitles,

    #[error("No subtitle stream with language '{0}'")]
    LanguageNotFound(String),

    #[error("No subtitle stream with title '{0}'")]
    TitleNotFound(String),

    #[error("ffmpeg failed with {}", describe_exit(.code))]
    ExtractionFailed { code: Option<i32>, stderr: String },

    #[error("Input closed while waiting for an answer")]
    PromptClosed,

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SubExtractError {
    fn user_message(&self) -> String {
        match self {
            SubExtractError::ToolUnavailable { tool } => {
                format!("'{}' is required but could not be found on the system path", tool)
            }
            SubExtractError::NoInput => "No input, exiting.".to_string(),
            SubExtractError::InputNotFound { path } => {
                format!("Input file not found: {}", path)
            }
            SubExtractError::OutputConflictDenied { path } => {
                format!("File '{}' exists, overwrite was not allowed", path)
            }
            SubExtractError::ProbeFailed { code, stderr } => {
                with_stderr(format!("ffprobe failed with {}", describe_exit(code)), stderr)
            }
            SubExtractError::MalformedProbeData { message } => {
                format!("ffprobe did not return usable JSON: {}", message)
            }
            SubExtractError::NoSubtitles => {
                "The input file has no embedded subtitles".to_string()
            }
            SubExtractError::LanguageNotFound(language) => {
                format!("Language '{}' does not exist in the input file", language)
            }
            SubExtractError::TitleNotFound(title) => {
                format!("Title '{}' does not exist in the input file", title)
            }
            SubExtractError::ExtractionFailed { code, stderr } => {
                with_stderr(format!("ffmpeg failed with {}", describe_exit(code)), stderr)
            }
            SubExtractError::PromptClosed => {
                "Standard input was closed before a valid answer was given".to_string()
            }
            SubExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SubExtractError::ToolUnavailable { .. } => Some(
                "Install ffmpeg (which ships ffprobe), or point --ffmpeg/--ffprobe or [tools] in the configuration file at the binaries.".to_string()
            ),
            SubExtractError::NoInput => Some(
                "Pass the media file with -i, e.g. subextract -i movie.mkv".to_string()
            ),
            SubExtractError::OutputConflictDenied { .. } => Some(
                "Use --overwrite to replace the existing file, or choose another destination with -o.".to_string()
            ),
            SubExtractError::LanguageNotFound(_) | SubExtractError::TitleNotFound(_) => Some(
                "Run without --language/--title to list the available streams.".to_string()
            ),
            SubExtractError::PromptClosed => Some(
                "Select a stream non-interactively with --language, --title or --auto.".to_string()
            ),
            SubExtractError::Config { .. } => Some(
                "Check your configuration file syntax and the values passed on the command line.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SubExtractError {
    fn from(error: serde_json::Error) -> Self {
        SubExtractError::MalformedProbeData {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SubExtractError {
    fn from(error: toml::de::Error) -> Self {
        SubExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubExtractError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn with_stderr(message: String, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        message
    } else {
        format!("{}: {}", message, stderr)
    }
}
