use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::selection::SelectionRequest;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "subextract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract one subtitle stream from a media file")]
#[command(
    long_about = "SubExtract lists the subtitle streams of a media container with ffprobe, \
                  picks one (by language, by title, by preference or by asking) and writes \
                  it to a standalone subtitle file with ffmpeg."
)]
#[command(after_help = "EXAMPLES:\n  \
    subextract -v -i movie.mp4 --language ita\n  \
    subextract -i movie.mkv --auto --ext vtt\n  \
    subextract -i movie.mkv --title \"English [SDH]\" -o subs/movie.en.srt --overwrite")]
pub struct Cli {
    /// Input media file
    #[arg(short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file (overrides --ext naming)
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Subtitle extension and format, e.g. srt, vtt, ass
    #[arg(long, value_name = "EXT", help = "Output extension / format (default: srt)")]
    pub ext: Option<String>,

    /// Select the stream with this exact language tag
    #[arg(long, value_name = "TAG")]
    pub language: Option<String>,

    /// Select the stream with this exact title tag
    #[arg(long, value_name = "TAG")]
    pub title: Option<String>,

    /// Pick a stream from the preferred titles and languages, asking only if none is unique
    #[arg(long)]
    pub auto: bool,

    /// Overwrite an existing output file without asking
    #[arg(long)]
    pub overwrite: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// ffmpeg binary to use
    #[arg(long, env = "SUBEXTRACT_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe binary to use
    #[arg(long, env = "SUBEXTRACT_FFPROBE", value_name = "PATH")]
    pub ffprobe: Option<String>,

    /// Dry run (show what would be extracted without executing)
    #[arg(long, help = "Probe and select, then print the ffmpeg command instead of running it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

/// Everything one run needs besides configuration.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extension: Option<String>,
    pub selection: SelectionRequest,
    pub overwrite: bool,
    pub dry_run: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::default()
            .with_ffmpeg(self.ffmpeg.clone())
            .with_ffprobe(self.ffprobe.clone())
    }

    pub fn selection_request(&self) -> SelectionRequest {
        SelectionRequest::from_selectors(self.language.as_deref(), self.title.as_deref(), self.auto)
    }

    pub fn extraction_request(&self) -> ExtractionRequest {
        ExtractionRequest {
            input: self.input.clone(),
            output: self.output.clone(),
            extension: self.ext.clone(),
            selection: self.selection_request(),
            overwrite: self.overwrite,
            dry_run: self.dry_run,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default tracing filter for the current verbosity, used when
    /// `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity_level() {
            0 | 1 => "subextract=warn",
            2 => "subextract=debug",
            _ => "subextract=trace",
        }
    }
}
