//! The conversion session loop, modelled as an explicit state machine.

use crate::core::conversion::{ExchangeRate, format_conversion};
use crate::core::history::{ConversionRecord, HistoryReport, SessionHistory, UserRegistry};
use crate::core::input::{request_amount, request_name};
use crate::core::ports::{DiagnosticsReporter, Prompt, Prompter, UserNotifier};
use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

pub const GREETING: &str = "Welcome to the currency conversion simulator!";
pub const FAREWELL: &str = "Thank you for using our converter. See you soon!";
pub const CONTINUE_QUESTION: &str = "Do you want to make another conversion?";
pub const ANOTHER_USER_QUESTION: &str = "Does another user want to use the converter?";

/// Whether each round of conversions is attributed to a named user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Single,
    PerUser,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    AwaitingUser,
    AwaitingAmount,
    Converting { amount: f64 },
    Displaying { amount: f64, converted: f64 },
    AwaitingContinue,
    AwaitingAnotherUser,
    Terminated,
}

/// Everything a finished session leaves behind.
#[derive(Debug)]
pub struct SessionOutcome {
    pub history: SessionHistory,
    pub registry: UserRegistry,
}

pub struct Session<'a> {
    rate: ExchangeRate,
    mode: SessionMode,
    prompter: &'a mut dyn Prompter,
    notifier: &'a mut dyn UserNotifier,
    diagnostics: &'a mut dyn DiagnosticsReporter,
    history: SessionHistory,
    registry: UserRegistry,
    current_user: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(
        rate: ExchangeRate,
        mode: SessionMode,
        prompter: &'a mut dyn Prompter,
        notifier: &'a mut dyn UserNotifier,
        diagnostics: &'a mut dyn DiagnosticsReporter,
    ) -> Self {
        Self {
            rate,
            mode,
            prompter,
            notifier,
            diagnostics,
            history: SessionHistory::new(),
            registry: UserRegistry::new(),
            current_user: None,
        }
    }

    fn initial_state(&self) -> SessionState {
        match self.mode {
            SessionMode::Single => SessionState::AwaitingAmount,
            SessionMode::PerUser => SessionState::AwaitingUser,
        }
    }

    /// Where to go once the current user stops converting.
    fn end_of_round(&self) -> SessionState {
        match self.mode {
            SessionMode::Single => SessionState::Terminated,
            SessionMode::PerUser => SessionState::AwaitingAnotherUser,
        }
    }

    /// Performs the work of `state` and returns the next state.
    pub fn step(&mut self, state: SessionState) -> Result<SessionState> {
        let next = match state {
            SessionState::AwaitingUser => {
                match request_name(&mut *self.prompter, &mut *self.notifier)? {
                    Prompt::Value(name) => {
                        info!(user = %name, "User registered");
                        self.notifier.notify(&format!("Hello, {name}!"))?;
                        self.registry.register(&name);
                        self.current_user = Some(name);
                        SessionState::AwaitingAmount
                    }
                    Prompt::Cancelled => SessionState::Terminated,
                }
            }
            SessionState::AwaitingAmount => {
                match request_amount(&mut *self.prompter, &mut *self.notifier, self.rate.source())? {
                    Prompt::Value(amount) => SessionState::Converting { amount },
                    Prompt::Cancelled => self.end_of_round(),
                }
            }
            SessionState::Converting { amount } => SessionState::Displaying {
                amount,
                converted: self.rate.convert(amount),
            },
            SessionState::Displaying { amount, converted } => {
                self.notifier
                    .notify(&format_conversion(amount, &self.rate, converted))?;
                self.history.push(ConversionRecord {
                    timestamp: Local::now(),
                    user: self.current_user.clone(),
                    source_amount: amount,
                    converted_amount: converted,
                    rate: self.rate.rate(),
                });
                info!(amount, converted, "Conversion recorded");
                SessionState::AwaitingContinue
            }
            SessionState::AwaitingContinue => {
                if self.prompter.confirm(CONTINUE_QUESTION)? {
                    SessionState::AwaitingAmount
                } else {
                    self.end_of_round()
                }
            }
            SessionState::AwaitingAnotherUser => {
                self.current_user = None;
                if self.prompter.confirm(ANOTHER_USER_QUESTION)? {
                    SessionState::AwaitingUser
                } else {
                    SessionState::Terminated
                }
            }
            SessionState::Terminated => SessionState::Terminated,
        };
        debug!(from = ?state, to = ?next, "Session transition");
        Ok(next)
    }

    /// Runs the session to completion: greeting, conversions, history
    /// report and farewell.
    pub fn run(mut self) -> Result<SessionOutcome> {
        self.notifier.notify(GREETING)?;

        let mut state = self.initial_state();
        while state != SessionState::Terminated {
            state = self.step(state)?;
        }

        let report = HistoryReport::from_session(
            &self.history,
            &self.registry,
            self.rate.source(),
            self.rate.target(),
        );
        self.diagnostics.report(&report)?;
        self.notifier.notify(&report.summary_notice())?;
        self.notifier.notify(FAREWELL)?;
        info!(
            conversions = report.summary.conversions,
            users = report.summary.registered_users,
            "Session finished"
        );

        Ok(SessionOutcome {
            history: self.history,
            registry: self.registry,
        })
    }
}
