pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod selection;
pub mod toolchain;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, ExtractionRequest, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ToolsConfig};
pub use error::{Result, SubExtractError, UserFriendlyError};

// Core functionality re-exports
pub use catalog::{Catalog, SubtitleStream};
pub use extractor::{ExtractionReport, OutputResolver, OutputTarget};
pub use selection::{select, AutoPreferences, Selection, SelectionReason, SelectionRequest};
pub use toolchain::{FfmpegToolchain, MediaToolchain, ToolCommand};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, Prompter};

use chrono::Utc;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

/// Main library interface: one subtitle extraction per [`SubExtract::run`].
pub struct SubExtract<T: MediaToolchain = FfmpegToolchain> {
    config: Config,
    toolchain: T,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl<T: MediaToolchain> SubExtract<T> {
    pub fn new(config: Config, toolchain: T, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            toolchain,
            output_formatter,
            progress_manager,
        }
    }

    /// Validate the request, pick a stream and write it out.
    ///
    /// The output conflict is settled before probing so a declined overwrite
    /// never spawns ffprobe. Prompts, when needed, go through `prompter`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        request: &ExtractionRequest,
        prompter: &mut Prompter<R, W>,
    ) -> Result<ExtractionReport> {
        let start_time = Instant::now();

        let input = request.input.as_deref().ok_or(SubExtractError::NoInput)?;
        if !input.exists() {
            return Err(SubExtractError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        self.toolchain.check_available()?;

        // Step 1: Settle the destination
        let resolver = OutputResolver::new(self.config.output.default_extension.clone())
            .with_force_overwrite(request.overwrite);
        let candidate =
            resolver.candidate_path(input, request.extension.as_deref(), request.output.as_deref())?;
        let existed = candidate.exists();

        let target = if request.dry_run {
            resolver.preview(candidate)
        } else {
            self.progress_manager
                .suspend(|| resolver.resolve(candidate, prompter))?
        };

        // Step 2: List subtitle streams
        let catalog = self.probe(input)?;
        self.output_formatter
            .info(&format!("Found {} subtitles", catalog.len()));
        for stream in catalog.iter() {
            self.output_formatter
                .debug(&format!("{}. {}", stream.index + 1, stream));
        }

        // Step 3: Choose one
        let (index, reason) = match select(&catalog, &request.selection, &self.config.selection)? {
            Selection::Resolved { index, reason } => (index, reason),
            Selection::NeedsInteractive => {
                self.progress_manager.clear();
                let index = self
                    .progress_manager
                    .suspend(|| prompter.choose_stream(&catalog))?;
                (index, SelectionReason::Interactive)
            }
        };
        let stream = catalog
            .get(index)
            .cloned()
            .ok_or(SubExtractError::NoSubtitles)?;
        tracing::info!(index, %reason, "selected subtitle stream");

        // Step 4: Extract
        let command = self
            .toolchain
            .extraction_command(input, index, &target)
            .to_display_vec();

        if !request.dry_run {
            self.extract(input, index, &target)?;
        }

        Ok(ExtractionReport {
            input: input.to_path_buf(),
            output: target.path.clone(),
            stream,
            subtitle_count: catalog.len(),
            reason,
            replaced_existing: existed && target.overwrite_allowed && !request.dry_run,
            dry_run: request.dry_run,
            command,
            extraction_time: Utc::now(),
            duration: start_time.elapsed(),
        })
    }

    fn probe(&self, input: &Path) -> Result<Catalog> {
        self.output_formatter.start_operation("Probing subtitle streams");

        let spinner = self.progress_manager.create_spinner("Running ffprobe");
        let catalog = self.toolchain.probe(input);
        ui::progress::finish_spinner(&spinner, "probe finished");

        catalog
    }

    fn extract(&self, input: &Path, index: usize, target: &OutputTarget) -> Result<()> {
        self.output_formatter.start_operation(&format!(
            "Extracting subtitle stream {} to {}",
            index + 1,
            target.path.display()
        ));

        let spinner = self.progress_manager.create_spinner("Running ffmpeg");
        let result = self.toolchain.extract(input, index, target);
        ui::progress::finish_spinner(&spinner, "extraction finished");

        result
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SubExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

impl SubExtract<FfmpegToolchain> {
    /// Create a SubExtract instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };
        let toolchain = FfmpegToolchain::from_config(&config.tools);

        Ok(Self::new(
            config,
            toolchain,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }
}

/// Generate sample configuration file
pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let sample_config = Config::create_sample_config();
    std::fs::write(output_path.as_ref(), sample_config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FakeToolchain {
        available: bool,
        catalog: Catalog,
        fail_extraction: bool,
        extractions: RefCell<Vec<(usize, OutputTarget)>>,
        probes: RefCell<usize>,
    }

    impl FakeToolchain {
        fn with_streams(streams: &[(Option<&str>, Option<&str>)]) -> Self {
            Self {
                available: true,
                catalog: Catalog::from_tags(streams.iter().map(|(language, title)| {
                    (language.map(str::to_string), title.map(str::to_string))
                })),
                fail_extraction: false,
                extractions: RefCell::new(Vec::new()),
                probes: RefCell::new(0),
            }
        }
    }

    impl MediaToolchain for FakeToolchain {
        fn check_available(&self) -> Result<()> {
            if self.available {
                Ok(())
            } else {
                Err(SubExtractError::ToolUnavailable {
                    tool: "ffmpeg".to_string(),
                })
            }
        }

        fn probe(&self, _input: &Path) -> Result<Catalog> {
            *self.probes.borrow_mut() += 1;
            Ok(self.catalog.clone())
        }

        fn extraction_command(&self, input: &Path, stream: usize, target: &OutputTarget) -> ToolCommand {
            toolchain::command::extraction_command("ffmpeg", input, stream, target)
        }

        fn extract(&self, _input: &Path, stream: usize, target: &OutputTarget) -> Result<()> {
            if self.fail_extraction {
                return Err(SubExtractError::ExtractionFailed {
                    code: Some(1),
                    stderr: "Invalid data found when processing input".to_string(),
                });
            }
            std::fs::write(&target.path, "1\n00:00:01,000 --> 00:00:02,000\nHello\n")?;
            self.extractions.borrow_mut().push((stream, target.clone()));
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        input: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("movie.mkv");
        std::fs::write(&input, b"not really a movie").unwrap();
        Fixture { _dir: dir, input }
    }

    fn app(toolchain: FakeToolchain) -> SubExtract<FakeToolchain> {
        SubExtract::new(Config::default(), toolchain, OutputMode::Plain, 0, true)
    }

    fn request(input: &Path, selection: SelectionRequest) -> ExtractionRequest {
        ExtractionRequest {
            input: Some(input.to_path_buf()),
            output: None,
            extension: None,
            selection,
            overwrite: false,
            dry_run: false,
        }
    }

    fn prompter(answers: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_missing_input_argument() {
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));
        let mut req = request(Path::new("unused"), SelectionRequest::Auto);
        req.input = None;

        let result = app.run(&req, &mut prompter(""));
        assert!(matches!(result, Err(SubExtractError::NoInput)));
    }

    #[test]
    fn test_input_not_found() {
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));
        let req = request(Path::new("/nonexistent/movie.mkv"), SelectionRequest::Auto);

        let result = app.run(&req, &mut prompter(""));
        assert!(matches!(result, Err(SubExtractError::InputNotFound { .. })));
        assert_eq!(*app.toolchain.probes.borrow(), 0);
    }

    #[test]
    fn test_unavailable_tools_stop_before_probe() {
        let fx = fixture();
        let mut toolchain = FakeToolchain::with_streams(&[(Some("eng"), None)]);
        toolchain.available = false;
        let app = app(toolchain);

        let result = app.run(&request(&fx.input, SelectionRequest::Auto), &mut prompter(""));
        assert!(matches!(result, Err(SubExtractError::ToolUnavailable { .. })));
        assert_eq!(*app.toolchain.probes.borrow(), 0);
    }

    #[test]
    fn test_language_selection_writes_next_to_input() {
        let fx = fixture();
        let app = app(FakeToolchain::with_streams(&[
            (Some("eng"), Some("English")),
            (Some("ita"), Some("Italiano")),
        ]));

        let report = app
            .run(
                &request(&fx.input, SelectionRequest::ByLanguage("ita".to_string())),
                &mut prompter(""),
            )
            .unwrap();

        assert_eq!(report.output, fx.input.with_extension("srt"));
        assert_eq!(report.stream.index, 1);
        assert_eq!(report.reason, SelectionReason::Language);
        assert_eq!(report.subtitle_count, 2);
        assert!(!report.replaced_existing);
        assert!(report.command.contains(&"0:s:1".to_string()));

        let extractions = app.toolchain.extractions.borrow();
        assert_eq!(extractions.len(), 1);
        assert_eq!(extractions[0].0, 1);
        assert!(!extractions[0].1.overwrite_allowed);
    }

    #[test]
    fn test_no_subtitles() {
        let fx = fixture();
        let app = app(FakeToolchain::with_streams(&[]));

        let result = app.run(&request(&fx.input, SelectionRequest::Auto), &mut prompter(""));
        assert!(matches!(result, Err(SubExtractError::NoSubtitles)));
        assert!(app.toolchain.extractions.borrow().is_empty());
    }

    #[test]
    fn test_interactive_choice() {
        let fx = fixture();
        let app = app(FakeToolchain::with_streams(&[
            (Some("eng"), None),
            (Some("gre"), None),
            (Some("ita"), None),
        ]));
        let mut prompter = prompter("7\nabc\n3\n");

        let report = app
            .run(&request(&fx.input, SelectionRequest::Interactive), &mut prompter)
            .unwrap();

        assert_eq!(report.stream.index, 2);
        assert_eq!(report.reason, SelectionReason::Interactive);

        let transcript = String::from_utf8(prompter.into_output()).unwrap();
        assert!(transcript.contains("\t1. Title: N/A (language: eng)"));
        assert!(transcript.contains("Please select a subtitle stream (1 to 3): "));
    }

    #[test]
    fn test_declined_overwrite_does_not_probe_or_extract() {
        let fx = fixture();
        let existing = fx.input.with_extension("srt");
        std::fs::write(&existing, "keep me").unwrap();
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));

        let result = app.run(&request(&fx.input, SelectionRequest::Auto), &mut prompter("n\n"));

        assert!(matches!(result, Err(SubExtractError::OutputConflictDenied { .. })));
        assert_eq!(*app.toolchain.probes.borrow(), 0);
        assert!(app.toolchain.extractions.borrow().is_empty());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me");
    }

    #[test]
    fn test_confirmed_overwrite_allows_replacing() {
        let fx = fixture();
        std::fs::write(fx.input.with_extension("srt"), "old").unwrap();
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));

        let report = app
            .run(&request(&fx.input, SelectionRequest::Auto), &mut prompter("y\n"))
            .unwrap();

        assert!(report.replaced_existing);
        assert!(report.command.contains(&"-y".to_string()));
        assert!(app.toolchain.extractions.borrow()[0].1.overwrite_allowed);
    }

    #[test]
    fn test_rerun_with_overwrite_is_idempotent() {
        let fx = fixture();
        let app = app(FakeToolchain::with_streams(&[
            (Some("eng"), Some("English")),
            (Some("gre"), Some("Greek")),
        ]));
        let mut req = request(&fx.input, SelectionRequest::ByTitle("Greek".to_string()));
        req.overwrite = true;

        let first = app.run(&req, &mut prompter("")).unwrap();
        let first_content = std::fs::read_to_string(&first.output).unwrap();
        let second = app.run(&req, &mut prompter("")).unwrap();

        assert_eq!(first.output, second.output);
        assert_eq!(first.stream, second.stream);
        assert!(!first.replaced_existing);
        assert!(second.replaced_existing);
        assert_eq!(std::fs::read_to_string(&second.output).unwrap(), first_content);
    }

    #[test]
    fn test_custom_extension_and_output() {
        let fx = fixture();
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));

        let mut req = request(&fx.input, SelectionRequest::Auto);
        req.extension = Some(".vtt".to_string());
        let report = app.run(&req, &mut prompter("")).unwrap();
        assert_eq!(report.output, fx.input.with_extension("vtt"));

        let explicit = fx.input.with_file_name("subs.en.srt");
        req.output = Some(explicit.clone());
        let report = app.run(&req, &mut prompter("")).unwrap();
        assert_eq!(report.output, explicit);
    }

    #[test]
    fn test_dry_run_does_not_extract_or_prompt() {
        let fx = fixture();
        std::fs::write(fx.input.with_extension("srt"), "old").unwrap();
        let app = app(FakeToolchain::with_streams(&[(Some("eng"), None)]));
        let mut req = request(&fx.input, SelectionRequest::Auto);
        req.dry_run = true;

        let report = app.run(&req, &mut prompter("")).unwrap();

        assert!(report.dry_run);
        assert!(!report.replaced_existing);
        assert!(report.command.contains(&"-n".to_string()));
        assert!(app.toolchain.extractions.borrow().is_empty());
    }

    #[test]
    fn test_extraction_failure_is_reported() {
        let fx = fixture();
        let mut toolchain = FakeToolchain::with_streams(&[(Some("eng"), None)]);
        toolchain.fail_extraction = true;
        let app = app(toolchain);

        let result = app.run(&request(&fx.input, SelectionRequest::Auto), &mut prompter(""));
        assert!(matches!(
            result,
            Err(SubExtractError::ExtractionFailed { code: Some(1), .. })
        ));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        generate_sample_config(&config_path).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[selection]"));
        assert!(content.contains("[tools]"));
    }
}
