use crate::catalog::Catalog;
use crate::error::{Result, SubExtractError};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Blocking line-based prompts.
///
/// Both questions re-ask until they get a valid answer; there is no retry
/// limit and no timeout.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr so stdout stays clean for JSON output.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// List the catalog and ask for a 1-based choice. Returns the 0-based index.
    pub fn choose_stream(&mut self, catalog: &Catalog) -> Result<usize> {
        for stream in catalog.iter() {
            writeln!(self.output, "\t{}. {}", stream.index + 1, stream)?;
        }

        let count = catalog.len();
        loop {
            let question = format!("Please select a subtitle stream (1 to {}): ", count);
            let answer = self.ask(&question)?.ok_or(SubExtractError::PromptClosed)?;

            match parse_choice(&answer, count) {
                Some(index) => return Ok(index),
                None => tracing::debug!(answer = %answer, "rejected stream choice"),
            }
        }
    }

    /// Ask whether an existing file may be replaced. Empty input (or a
    /// closed input stream) means no.
    pub fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        loop {
            let question = format!(
                "File '{}' already exists. Overwrite? [y/N] ",
                path.display()
            );
            let answer = match self.ask(&question)? {
                Some(answer) => answer,
                None => return Ok(false),
            };

            match parse_confirmation(&answer) {
                Some(confirmed) => return Ok(confirmed),
                None => tracing::debug!(answer = %answer, "rejected overwrite answer"),
            }
        }
    }

    /// Print the question and read one line. `None` on end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}

fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let choice: usize = answer.parse().ok()?;
    if (1..=count).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}

fn parse_confirmation(answer: &str) -> Option<bool> {
    if answer.eq_ignore_ascii_case("y") {
        Some(true)
    } else if answer.is_empty() || answer.eq_ignore_ascii_case("n") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn two_streams() -> Catalog {
        Catalog::from_tags(vec![
            (Some("eng".to_string()), Some("English".to_string())),
            (None, None),
        ])
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_choose_stream_lists_catalog() {
        let mut prompter = prompter("2\n");
        let index = prompter.choose_stream(&two_streams()).unwrap();
        assert_eq!(index, 1);

        let shown = String::from_utf8(prompter.output).unwrap();
        assert!(shown.contains("1. Title: English (language: eng)"));
        assert!(shown.contains("2. Title: N/A (language: N/A)"));
        assert!(shown.contains("(1 to 2)"));
    }

    #[test]
    fn test_choose_stream_reprompts_until_valid() {
        let mut prompter = prompter("abc\n0\n3\n-1\n\n 1 \n");
        let index = prompter.choose_stream(&two_streams()).unwrap();
        assert_eq!(index, 0);

        let shown = String::from_utf8(prompter.output).unwrap();
        assert_eq!(shown.matches("Please select a subtitle stream").count(), 6);
    }

    #[test]
    fn test_choose_stream_closed_input() {
        let mut prompter = prompter("nope\n");
        let result = prompter.choose_stream(&two_streams());
        assert!(matches!(result, Err(SubExtractError::PromptClosed)));
    }

    #[test]
    fn test_confirm_overwrite_answers() {
        let path = Path::new("/tmp/movie.srt");

        assert!(prompter("y\n").confirm_overwrite(path).unwrap());
        assert!(prompter("Y\n").confirm_overwrite(path).unwrap());
        assert!(!prompter("n\n").confirm_overwrite(path).unwrap());
        assert!(!prompter("N\n").confirm_overwrite(path).unwrap());
        assert!(!prompter("\n").confirm_overwrite(path).unwrap());
        assert!(!prompter("").confirm_overwrite(path).unwrap());
    }

    #[test]
    fn test_confirm_overwrite_reprompts() {
        let mut prompter = prompter("yes\nmaybe\ny\n");
        assert!(prompter.confirm_overwrite(Path::new("out.srt")).unwrap());

        let shown = String::from_utf8(prompter.output).unwrap();
        assert_eq!(shown.matches("File 'out.srt' already exists. Overwrite? [y/N] ").count(), 3);
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("1.5", 3), None);
    }
}
