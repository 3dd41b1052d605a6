use clap::Parser;
use std::process;
use subextract::{Cli, OutputFormatter, OutputMode, Prompter, SubExtract, SubExtractError, UserFriendlyError};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(&cli);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let subextract = match SubExtract::from_cli(&cli) {
        Ok(subextract) => subextract,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let request = cli.extraction_request();
    let mut prompter = Prompter::terminal();

    match subextract.run(&request, &mut prompter) {
        Ok(report) => {
            subextract.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            tracing::debug!(error = ?e, "run aborted");
            subextract.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "subextract.toml".to_string());

    match subextract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  subextract -i <media-file> --config {}", config_path);
            println!("\nEdit the preference lists to change what --auto picks.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &SubExtractError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the `-v` level.
fn setup_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "subextract",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[selection]"));
    }

    #[test]
    fn test_generate_config_into_missing_directory() {
        let cli = Cli::try_parse_from([
            "subextract",
            "--generate-config",
            "--config",
            "/nonexistent/dir/subextract.toml",
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 1);
    }
}
