//! Line-oriented questions over a single input/output pair.
//!
//! Every question blocks until a line is read. Invalid answers are reported
//! with a warning and the question is asked again; running out of input is
//! the only way a question fails.

use std::io::{self, BufRead, Write};

use crate::console::{Tone, paint};
use crate::error::AppResult;

#[derive(Debug, Clone, Default)]
pub struct TextOptions<'a> {
    pub required: bool,
    pub default: Option<&'a str>,
}

impl<'a> TextOptions<'a> {
    pub fn required() -> Self {
        Self {
            required: true,
            default: None,
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: Option<&'a str>) -> Self {
        self.default = default;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SecretOptions {
    pub allow_empty: bool,
    pub has_existing: bool,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask_text(&mut self, question: &str, options: TextOptions<'_>) -> AppResult<String> {
        let question = match options.default {
            Some(default) if !default.is_empty() => format!("{question} ({default})"),
            _ => question.to_string(),
        };
        loop {
            let answer = self.ask_line(&question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(default) = options.default {
                return Ok(default.to_string());
            }
            if !options.required {
                return Ok(String::new());
            }
            self.notify(Tone::Warning, "Input cannot be empty.")?;
        }
    }

    /// Empty answers are accepted when blank means "keep the existing value".
    pub fn ask_secret(&mut self, question: &str, options: SecretOptions) -> AppResult<String> {
        let question = if options.has_existing {
            format!("{question} (leave blank to keep current)")
        } else {
            question.to_string()
        };
        loop {
            let answer = self.ask_line(&question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if options.allow_empty && options.has_existing {
                return Ok(String::new());
            }
            if !options.allow_empty && !options.has_existing {
                self.notify(Tone::Warning, "Input cannot be empty.")?;
                continue;
            }
            return Ok(String::new());
        }
    }

    pub fn ask_yes_no(&mut self, question: &str) -> AppResult<bool> {
        let question = format!("{question} (y/n)");
        loop {
            match self.ask_line(&question)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.notify(Tone::Warning, "Please answer y or n.")?,
            }
        }
    }

    pub fn notify(&mut self, tone: Tone, message: &str) -> AppResult<()> {
        writeln!(self.output, "{}", paint(tone, message))?;
        Ok(())
    }

    /// Plain, uncolored output line.
    pub fn line(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn ask_line(&mut self, question: &str) -> AppResult<String> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            )
            .into());
        }
        Ok(input.trim().to_string())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::AppError;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn required_text_reprompts_until_answered() {
        let mut p = prompter("\n   \n  PROJ-1  \n");
        let answer = p.ask_text("Ticket", TextOptions::required()).unwrap();
        assert_eq!(answer, "PROJ-1");
        assert_eq!(output(p).matches("Input cannot be empty.").count(), 2);
    }

    #[test]
    fn empty_text_uses_default() {
        let mut p = prompter("\n");
        let answer = p
            .ask_text("Project ID", TextOptions::required().with_default(Some("11203")))
            .unwrap();
        assert_eq!(answer, "11203");
        assert!(output(p).contains("Project ID (11203): "));
    }

    #[test]
    fn optional_text_may_be_empty() {
        let mut p = prompter("\n");
        assert_eq!(p.ask_text("Assignee", TextOptions::optional()).unwrap(), "");
    }

    #[test]
    fn secret_keeps_existing_when_blank() {
        let mut p = prompter("\n");
        let options = SecretOptions {
            allow_empty: true,
            has_existing: true,
        };
        assert_eq!(p.ask_secret("Token", options).unwrap(), "");
        assert!(output(p).contains("leave blank to keep current"));
    }

    #[test]
    fn secret_without_existing_value_reprompts() {
        let mut p = prompter("\nabc\n");
        let answer = p.ask_secret("Token", SecretOptions::default()).unwrap();
        assert_eq!(answer, "abc");
        assert!(output(p).contains("Input cannot be empty."));
    }

    #[test]
    fn secret_allowing_empty_without_existing_returns_blank() {
        let mut p = prompter("\n");
        let options = SecretOptions {
            allow_empty: true,
            has_existing: false,
        };
        assert_eq!(p.ask_secret("Token", options).unwrap(), "");
    }

    #[test]
    fn yes_no_accepts_variants_case_insensitively() {
        let mut p = prompter("YES\nn\nmaybe\nY\n");
        assert!(p.ask_yes_no("Push?").unwrap());
        assert!(!p.ask_yes_no("Push?").unwrap());
        assert!(p.ask_yes_no("Push?").unwrap());
        assert_eq!(output(p).matches("Please answer y or n.").count(), 1);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("");
        let err = p.ask_text("Summary", TextOptions::required()).unwrap_err();
        assert!(matches!(err, AppError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }
}
