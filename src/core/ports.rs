//! Input and output boundaries of a conversion session.

use crate::core::history::HistoryReport;
use anyhow::Result;

/// Outcome of a single prompt: either a value or an explicit cancellation.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt<T> {
    Value(T),
    Cancelled,
}

impl<T> Prompt<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Prompt::Cancelled)
    }
}

/// Reads free-form answers from the user.
pub trait Prompter {
    /// Shows `prompt` and blocks until a line is read or the user cancels.
    fn read_line(&mut self, prompt: &str) -> Result<Prompt<String>>;

    /// Asks a yes/no question. Cancelling counts as "no".
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N]"))?;
        Ok(matches!(answer, Prompt::Value(a) if is_affirmative(&a)))
    }
}

/// User-visible messages: greetings, results, corrections and farewells.
pub trait UserNotifier {
    fn notify(&mut self, message: &str) -> Result<()>;
    fn error(&mut self, message: &str) -> Result<()>;
}

/// Verbose channel receiving the structured session history.
pub trait DiagnosticsReporter {
    fn report(&mut self, report: &HistoryReport) -> Result<()>;
}

/// Returns true for the accepted spellings of "yes".
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Prompt<String>>);

    impl Prompter for Scripted {
        fn read_line(&mut self, _prompt: &str) -> Result<Prompt<String>> {
            Ok(self.0.pop_front().unwrap_or(Prompt::Cancelled))
        }
    }

    #[test]
    fn test_is_affirmative() {
        for yes in ["y", "Y", " yes ", "YES", "s", "si", "Sí"] {
            assert!(is_affirmative(yes), "{yes} should be accepted");
        }
        for no in ["", "n", "no", "nope", "yess", "0"] {
            assert!(!is_affirmative(no), "{no} should be declined");
        }
    }

    #[test]
    fn test_confirm_defaults_to_no_on_cancel() -> Result<()> {
        let mut prompter = Scripted(VecDeque::from([
            Prompt::Value("yes".to_string()),
            Prompt::Value("maybe".to_string()),
            Prompt::Cancelled,
        ]));
        assert!(prompter.confirm("Again?")?);
        assert!(!prompter.confirm("Again?")?);
        assert!(!prompter.confirm("Again?")?);
        Ok(())
    }
}
