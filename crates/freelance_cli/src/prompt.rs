//! Line-oriented prompt adapter.
//!
//! # Responsibility
//! - Print questions and read answers over any `BufRead`/`Write` pair.
//! - Re-ask until raw text parses, so menus only see typed values.
//!
//! # Invariants
//! - End of input surfaces as `PromptError::Closed`, never as an empty answer.
//! - Confirmation defaults to "no".

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Line that ends a multi-line answer.
pub const MULTILINE_END: &str = ".";

pub type PromptResult<T> = Result<T, PromptError>;

#[derive(Debug)]
pub enum PromptError {
    Io(io::Error),
    /// Input stream reached EOF.
    Closed,
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Closed => write!(f, "input closed"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Closed => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, text: impl Display) -> PromptResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Asks for one line; the answer is trimmed.
    pub fn ask(&mut self, label: &str) -> PromptResult<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.trim().to_string())
    }

    /// Asks until `parse` accepts the answer, echoing each rejection.
    pub fn ask_parsed<T, E: Display>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> PromptResult<T> {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format!("  {err}"))?,
            }
        }
    }

    /// Asks until a non-blank answer is given.
    pub fn ask_required(&mut self, label: &str) -> PromptResult<String> {
        self.ask_parsed(label, |answer| {
            if answer.is_empty() {
                Err(format!("{label} is required"))
            } else {
                Ok(answer.to_string())
            }
        })
    }

    /// Collects lines until a line holding only [`MULTILINE_END`].
    pub fn ask_multiline(&mut self, label: &str) -> PromptResult<String> {
        self.say(format!("{label} (finish with a line containing only `{MULTILINE_END}`):"))?;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim() == MULTILINE_END {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    /// Lists `options` numbered from 1 and returns the picked one.
    ///
    /// A blank answer or `0` cancels with `None`.
    pub fn choose<'a, T>(
        &mut self,
        label: &str,
        options: &'a [T],
        describe: impl Fn(&T) -> String,
    ) -> PromptResult<Option<&'a T>> {
        self.say(label)?;
        for (index, option) in options.iter().enumerate() {
            self.say(format!("  {}) {}", index + 1, describe(option)))?;
        }
        let count = options.len();
        let picked = self.ask_parsed("Choice (blank to cancel)", |answer| {
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(0) => Ok(None),
                Ok(number) if number <= count => Ok(Some(number - 1)),
                _ => Err(format!("pick a number between 1 and {count}")),
            }
        })?;
        Ok(picked.map(|index| &options[index]))
    }

    /// Asks a yes/no question; anything but `y`/`yes` means no.
    pub fn confirm(&mut self, question: &str) -> PromptResult<bool> {
        let answer = self.ask(&format!("{question} [y/N]"))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn read_line(&mut self) -> PromptResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptError, Prompter};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_parsed_retries_until_valid() {
        let mut prompt = prompter("abc\n-1\n42\n");
        let value = prompt
            .ask_parsed("Amount", |raw| match raw.parse::<i32>() {
                Ok(number) if number >= 0 => Ok(number),
                _ => Err("not a non-negative number"),
            })
            .unwrap();
        assert_eq!(value, 42);

        let output = String::from_utf8(prompt.output).unwrap();
        assert_eq!(output.matches("not a non-negative number").count(), 2);
    }

    #[test]
    fn choose_returns_picked_option_or_none() {
        let options = ["hourly", "retainer"];
        let mut prompt = prompter("5\n2\n\n");

        let picked = prompt.choose("Type", &options, |o| o.to_string()).unwrap();
        assert_eq!(picked, Some(&"retainer"));

        let cancelled = prompt.choose("Type", &options, |o| o.to_string()).unwrap();
        assert_eq!(cancelled, None);
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut prompt = prompter("\nYes\nn\n");
        assert!(!prompt.confirm("Delete?").unwrap());
        assert!(prompt.confirm("Delete?").unwrap());
        assert!(!prompt.confirm("Delete?").unwrap());
    }

    #[test]
    fn multiline_stops_at_terminator() {
        let mut prompt = prompter("line one\n  indented\n.\nnext\n");
        let text = prompt.ask_multiline("Content").unwrap();
        assert_eq!(text, "line one\n  indented");
        assert_eq!(prompt.ask("Next").unwrap(), "next");
    }

    #[test]
    fn eof_is_reported_as_closed() {
        let mut prompt = prompter("");
        assert!(matches!(prompt.ask("Name"), Err(PromptError::Closed)));
    }
}
