//! Console abstraction so interactive prompts are scriptable in tests.

use std::io::BufRead;

use crate::error::BridgeError;

/// Source of interactive answers.
pub trait Console {
    /// Read one line, without the trailing newline.
    ///
    /// # Errors
    /// Returns an error when no further input is available.
    fn read_line(&mut self) -> Result<String, std::io::Error>;
}

/// Production console reading standard input.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self) -> Result<String, std::io::Error> {
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Ask a question, re-issuing it until the validator accepts the answer.
///
/// The question is printed with the default in square brackets when one
/// exists; an empty answer selects that default. Invalid answers print
/// `error_message` and loop.
///
/// # Errors
/// Returns an error when the console runs out of input.
pub fn ask<C: Console + ?Sized>(
    console: &mut C,
    message: &str,
    default: Option<&str>,
    error_message: &str,
    valid: &dyn Fn(&str) -> bool,
) -> Result<String, BridgeError> {
    loop {
        match default {
            Some(default) => println!("{message} [{default}]?"),
            None => println!("{message}?"),
        }
        let answer = console
            .read_line()
            .map_err(|source| BridgeError::Console { source })?;
        let answer = answer.trim();

        if answer.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_owned());
            }
        }

        if valid(answer) {
            return Ok(answer.to_owned());
        }
        println!("{error_message}");
    }
}

/// Scripted console handing out canned answers, for tests.
#[cfg(test)]
#[derive(Debug)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    pub fn exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String, std::io::Error> {
        self.answers.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "answer script exhausted")
        })
    }
}
