//! Line-oriented prompt helpers over any reader/writer pair.
//!
//! # Invariants
//! - Blank input and end of input both read as `None`.
//! - Returned strings are trimmed.

use crate::error::{AppError, InputError};
use projects_core::Decimal2;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn print_line(&mut self, line: impl Display) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Prints `prompt: ` and reads one line.
    pub fn read_string(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    pub fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>, AppError> {
        match self.read_string(prompt)? {
            Some(text) => match text.parse() {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(InputError::InvalidNumber(text).into()),
            },
            None => Ok(None),
        }
    }

    pub fn read_decimal(&mut self, prompt: &str) -> Result<Option<Decimal2>, AppError> {
        match self.read_string(prompt)? {
            Some(text) => match text.parse() {
                Ok(value) => Ok(Some(value)),
                Err(source) => Err(InputError::InvalidDecimal {
                    input: text,
                    source,
                }
                .into()),
            },
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use crate::error::{AppError, InputError};
    use projects_core::ParseDecimalError;

    #[test]
    fn blank_and_eof_read_as_none() {
        let mut output = Vec::new();
        let mut console = Console::new("   \n".as_bytes(), &mut output);

        assert_eq!(console.read_string("Name").unwrap(), None);
        assert_eq!(console.read_string("Name").unwrap(), None);
        drop(console);
        assert_eq!(String::from_utf8(output).unwrap(), "Name: Name: ");
    }

    #[test]
    fn read_string_trims_input() {
        let mut console = Console::new("  Build deck \n".as_bytes(), Vec::new());
        assert_eq!(
            console.read_string("Name").unwrap().as_deref(),
            Some("Build deck")
        );
    }

    #[test]
    fn read_number_rejects_text() {
        let mut console = Console::new("abc\n".as_bytes(), Vec::new());

        let err = console.read_number::<i32>("Pick").unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::InvalidNumber(ref text)) if text == "abc"));
        assert_eq!(err.to_string(), "abc is not a valid number.");
    }

    #[test]
    fn read_decimal_normalizes_scale() {
        let mut console = Console::new("10\n1.234\n".as_bytes(), Vec::new());

        let hours = console.read_decimal("Hours").unwrap().unwrap();
        assert_eq!(hours.to_string(), "10.00");

        let err = console.read_decimal("Hours").unwrap_err();
        assert_eq!(err.to_string(), "1.234 is not a valid decimal number.");
        match err {
            AppError::Input(InputError::InvalidDecimal { input, source }) => {
                assert_eq!(input, "1.234");
                assert_eq!(source, ParseDecimalError::TooPrecise("1.234".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
