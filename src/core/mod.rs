//! Core conversion logic, independent of the terminal.

pub mod config;
pub mod conversion;
pub mod history;
pub mod input;
pub mod log;
pub mod ports;
pub mod session;

// Re-export main types for cleaner imports
pub use conversion::ExchangeRate;
pub use history::{ConversionRecord, HistoryReport, SessionHistory, UserRegistry};
pub use ports::{DiagnosticsReporter, Prompt, Prompter, UserNotifier};
pub use session::{Session, SessionMode, SessionOutcome, SessionState};
