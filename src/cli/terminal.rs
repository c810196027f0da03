//! Terminal implementations of the session ports.

use super::ui;
use crate::core::conversion::format_amount;
use crate::core::history::HistoryReport;
use crate::core::ports::{DiagnosticsReporter, Prompt, Prompter, UserNotifier};
use anyhow::{Context, Result};
use comfy_table::Cell;
use console::Term;
use std::io::{BufRead, StdinLock, Write};
use tracing::info;

/// Answer that cancels the current prompt, besides end of input.
pub const CANCEL_WORD: &str = "cancel";

/// Line-based prompter reading answers from any `BufRead`.
pub struct TerminalPrompter<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<StdinLock<'static>, Term> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), Term::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Prompt<String>> {
        write!(
            self.writer,
            "{} ",
            ui::style_text(prompt, ui::StyleType::Prompt)
        )?;
        self.writer.flush().context("Failed to write prompt")?;

        // Lines that are not valid UTF-8 are decoded lossily and left to
        // the caller's validation.
        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read from terminal")?;
        if read == 0 {
            // End of input, e.g. Ctrl-D.
            writeln!(self.writer)?;
            return Ok(Prompt::Cancelled);
        }

        let line = String::from_utf8_lossy(&buf);
        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.trim().eq_ignore_ascii_case(CANCEL_WORD) {
            return Ok(Prompt::Cancelled);
        }
        Ok(Prompt::Value(answer.to_string()))
    }
}

/// Writes user-facing messages, separated by blank lines.
pub struct ConsoleNotifier<W: Write> {
    writer: W,
}

impl ConsoleNotifier<Term> {
    pub fn stdout() -> Self {
        Self::new(Term::stdout())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> UserNotifier for ConsoleNotifier<W> {
    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "\n{message}\n").context("Failed to write message")
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(
            self.writer,
            "\n{}\n",
            ui::style_text(message, ui::StyleType::Error)
        )
        .context("Failed to write error message")
    }
}

/// Renders the full session history as a table on the diagnostics output.
pub struct ConsoleDiagnostics<W: Write> {
    writer: W,
}

impl ConsoleDiagnostics<Term> {
    pub fn stderr() -> Self {
        Self::new(Term::stderr())
    }
}

impl<W: Write> ConsoleDiagnostics<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticsReporter for ConsoleDiagnostics<W> {
    fn report(&mut self, report: &HistoryReport) -> Result<()> {
        for entry in &report.entries {
            info!(
                ordinal = entry.ordinal,
                timestamp = %entry.timestamp,
                user = ?entry.user,
                source_amount = entry.source_amount,
                converted_amount = entry.converted_amount,
                rate = entry.rate,
                "History entry"
            );
        }
        writeln!(self.writer, "{}", render_report(report)).context("Failed to write history")
    }
}

/// Formats a history report as plain text with an embedded table.
pub fn render_report(report: &HistoryReport) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Conversion history", ui::StyleType::Title)
    );

    if report.is_empty() {
        output.push_str(&ui::style_text(
            "No conversions were made in this session.",
            ui::StyleType::Subtle,
        ));
    } else {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("#"),
            ui::header_cell("Date"),
            ui::header_cell("User"),
            ui::header_cell(&format!("Amount ({})", report.source_currency)),
            ui::header_cell(&format!("Converted ({})", report.target_currency)),
            ui::header_cell(&format!(
                "Rate ({}/{})",
                report.source_currency, report.target_currency
            )),
        ]);
        for entry in &report.entries {
            table.add_row(vec![
                Cell::new(entry.ordinal),
                Cell::new(&entry.timestamp),
                ui::format_optional_cell(entry.user.as_deref(), str::to_string),
                ui::amount_cell(entry.source_amount),
                ui::amount_cell(entry.converted_amount),
                ui::amount_cell(entry.rate),
            ]);
        }
        output.push_str(&table.to_string());
    }

    output.push_str(&format!(
        "\n\n{} {}\n{} {}",
        ui::style_text("Registered users:", ui::StyleType::TotalLabel),
        ui::style_text(
            &report.summary.registered_users.to_string(),
            ui::StyleType::TotalValue
        ),
        ui::style_text("Total conversions:", ui::StyleType::TotalLabel),
        ui::style_text(
            &report.summary.conversions.to_string(),
            ui::StyleType::TotalValue
        ),
    ));
    if let Some(last) = report.entries.last() {
        output.push_str(&format!(
            "\n{} {} {}",
            ui::style_text("Last conversion:", ui::StyleType::TotalLabel),
            format_amount(last.converted_amount),
            report.target_currency
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::{ConversionRecord, SessionHistory, UserRegistry};
    use chrono::Local;
    use std::io::Cursor;

    fn plain(bytes: Vec<u8>) -> String {
        console::strip_ansi_codes(&String::from_utf8(bytes).unwrap()).to_string()
    }

    #[test]
    fn test_prompter_reads_lines_and_cancels_on_eof() -> Result<()> {
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(Cursor::new("100\r\n  abc \n"), &mut out);

        assert_eq!(prompter.read_line("Amount:")?, Prompt::Value("100".to_string()));
        assert_eq!(prompter.read_line("Amount:")?, Prompt::Value("  abc ".to_string()));
        assert!(prompter.read_line("Amount:")?.is_cancelled());

        drop(prompter);
        assert_eq!(plain(out).matches("Amount:").count(), 3);
        Ok(())
    }

    #[test]
    fn test_prompter_cancel_word() -> Result<()> {
        let mut prompter =
            TerminalPrompter::new(Cursor::new(" CANCEL \nQ\n\n"), Vec::new());

        assert!(prompter.read_line("?")?.is_cancelled());
        assert_eq!(prompter.read_line("?")?, Prompt::Value("Q".to_string()));
        assert_eq!(prompter.read_line("?")?, Prompt::Value(String::new()));
        Ok(())
    }

    #[test]
    fn test_prompter_decodes_invalid_utf8_lossily() -> Result<()> {
        let mut prompter = TerminalPrompter::new(Cursor::new(&b"\xff\xfe\n100\n"[..]), Vec::new());

        match prompter.read_line("Amount:")? {
            Prompt::Value(text) => assert_eq!(text, "\u{FFFD}\u{FFFD}"),
            Prompt::Cancelled => panic!("Expected a value"),
        }
        assert_eq!(prompter.read_line("Amount:")?, Prompt::Value("100".to_string()));
        Ok(())
    }

    #[test]
    fn test_prompter_confirm() -> Result<()> {
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(Cursor::new("y\nn\n"), &mut out);

        assert!(prompter.confirm("Again?")?);
        assert!(!prompter.confirm("Again?")?);
        assert!(!prompter.confirm("Again?")?);

        drop(prompter);
        assert!(plain(out).contains("Again? [y/N]"));
        Ok(())
    }

    #[test]
    fn test_notifier_writes_messages() -> Result<()> {
        let mut out = Vec::new();
        let mut notifier = ConsoleNotifier::new(&mut out);
        notifier.notify("Welcome")?;
        notifier.error("Bad amount")?;

        drop(notifier);
        let text = plain(out);
        assert!(text.contains("Welcome"));
        assert!(text.contains("Bad amount"));
        Ok(())
    }

    #[test]
    fn test_render_empty_report() {
        let report =
            HistoryReport::from_session(&SessionHistory::new(), &UserRegistry::new(), "ARS", "USD");
        let text = console::strip_ansi_codes(&render_report(&report)).to_string();

        assert!(text.contains("No conversions were made in this session."));
        assert!(text.contains("Registered users: 0"));
        assert!(text.contains("Total conversions: 0"));
    }

    #[test]
    fn test_diagnostics_renders_table() -> Result<()> {
        let mut history = SessionHistory::new();
        history.push(ConversionRecord {
            timestamp: Local::now(),
            user: Some("Ana".to_string()),
            source_amount: 100.0,
            converted_amount: 100.0 / 1350.50,
            rate: 1350.50,
        });
        let mut registry = UserRegistry::new();
        registry.register("Ana");
        let report = HistoryReport::from_session(&history, &registry, "ARS", "USD");

        let mut out = Vec::new();
        ConsoleDiagnostics::new(&mut out).report(&report)?;
        let text = plain(out);

        assert!(text.contains("Amount (ARS)"));
        assert!(text.contains("Ana"));
        assert!(text.contains("100.00"));
        assert!(text.contains("0.07"));
        assert!(text.contains("1350.50"));
        assert!(text.contains("Registered users: 1"));
        assert!(text.contains("Total conversions: 1"));
        Ok(())
    }
}
