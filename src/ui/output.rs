use crate::error::{SubExtractError, UserFriendlyError};
use crate::extractor::ExtractionReport;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static FILM: Emoji = Emoji("🎬 ", "> ");

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Success,
    Error,
    Warning,
    Info,
    Operation,
    Debug,
}

impl Level {
    fn min_verbosity(self) -> u8 {
        match self {
            Level::Success | Level::Error | Level::Warning => 0,
            Level::Info | Level::Operation => 1,
            Level::Debug => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Operation => "operation_start",
            Level::Debug => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Progress and status messages plus the final report.
///
/// In JSON mode stdout carries nothing but the report document; every
/// message line goes to stderr.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    /// Shown from `-v`.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Shown from `-vv`.
    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Operation, operation);
    }

    pub fn print_user_friendly_error(&self, error: &SubExtractError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human if self.use_colors => eprintln!(
                    "{}{}",
                    INFO,
                    style(format!("Suggestion: {}", suggestion)).cyan()
                ),
                OutputMode::Human => eprintln!("Suggestion: {}", suggestion),
                OutputMode::Json => eprintln!(
                    "{}",
                    serde_json::json!({ "type": "suggestion", "message": suggestion })
                ),
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    fn should_show(&self, level: Level) -> bool {
        level == Level::Error || (!self.quiet && self.verbose_level >= level.min_verbosity())
    }

    fn stream_for(&self, level: Level) -> Stream {
        match (self.mode, level) {
            (OutputMode::Json, _) | (_, Level::Error) => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    fn render(&self, level: Level, message: &str) -> String {
        match self.mode {
            OutputMode::Json => serde_json::json!({
                "type": "message",
                "level": level.label(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
            .to_string(),
            OutputMode::Plain => format!("{}: {}", level.label().to_uppercase(), message),
            OutputMode::Human if self.use_colors => match level {
                Level::Success => format!("{}{}", CHECKMARK, style(message).green().bold()),
                Level::Error => format!("{}{}", CROSS, style(message).red().bold()),
                Level::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
                Level::Info => format!("{}{}", INFO, style(message).cyan()),
                Level::Operation => format!("{}{}", FILM, style(message).bold()),
                Level::Debug => format!("  {}", style(message).dim()),
            },
            OutputMode::Human => match level {
                Level::Success => format!("✓ {}", message),
                Level::Error => format!("✗ {}", message),
                Level::Warning => format!("! {}", message),
                Level::Info => format!("i {}", message),
                Level::Operation => format!("> {}", message),
                Level::Debug => format!("  DEBUG: {}", message),
            },
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.should_show(level) {
            return;
        }

        let line = self.render(level, message);
        match self.stream_for(level) {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }

    fn print_human_report(&self, report: &ExtractionReport) {
        if report.dry_run {
            println!();
            println!("=== Dry run ===");
        }

        let stream = format!("#{} {}", report.stream.index + 1, report.stream);
        let output = report.output.display().to_string();

        if self.use_colors {
            println!("  Stream:  {} ({})", style(&stream).cyan().bold(), report.reason);
            println!("  Output:  {}", style(&output).cyan().bold());
        } else {
            println!("  Stream:  {} ({})", stream, report.reason);
            println!("  Output:  {}", output);
        }

        if report.dry_run {
            println!("  Command: {}", report.command_line());
            return;
        }

        if report.replaced_existing {
            self.warning(&format!("Replaced existing file {}", output));
        }
        self.debug(&format!("Command: {}", report.command_line()));
        self.success(&format!(
            "Extracted subtitle stream {} of {} in {}",
            report.stream.index + 1,
            report.subtitle_count,
            format_duration(report.duration)
        ));
    }

    fn print_plain_report(&self, report: &ExtractionReport) {
        if report.dry_run {
            println!("DRY RUN: no file written");
        } else {
            println!("REPORT: Extraction completed");
        }
        println!("Input: {}", report.input.display());
        println!("Output: {}", report.output.display());
        println!(
            "Stream: {} of {} ({})",
            report.stream.index + 1,
            report.subtitle_count,
            report.stream
        );
        println!("Selected by: {}", report.reason);
        println!("Command: {}", report.command_line());
        if !report.dry_run {
            println!("Duration: {:?}", report.duration);
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
