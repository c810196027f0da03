use super::terminal::{ConsoleDiagnostics, ConsoleNotifier, TerminalPrompter};
use crate::core::{ExchangeRate, Session, SessionMode, SessionOutcome};
use anyhow::Result;
use tracing::info;

/// Runs an interactive session on the process terminal.
pub fn run(rate: ExchangeRate, mode: SessionMode) -> Result<SessionOutcome> {
    info!(%rate, ?mode, "Starting conversion session");

    let mut prompter = TerminalPrompter::stdio();
    let mut notifier = ConsoleNotifier::stdout();
    let mut diagnostics = ConsoleDiagnostics::stderr();

    Session::new(rate, mode, &mut prompter, &mut notifier, &mut diagnostics).run()
}
