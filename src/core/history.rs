//! In-memory session history and the report built from it.

use chrono::{DateTime, Local};
use std::collections::HashSet;

/// A single successful conversion. Never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub timestamp: DateTime<Local>,
    pub user: Option<String>,
    pub source_amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
}

/// Append-only, insertion-ordered list of conversions.
#[derive(Debug, Default, Clone)]
pub struct SessionHistory {
    records: Vec<ConversionRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Append-only list of user names registered during a session.
#[derive(Debug, Default, Clone)]
pub struct UserRegistry {
    users: Vec<String>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str) {
        self.users.push(name.to_string());
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Number of different names, ignoring repeat registrations.
    pub fn distinct_count(&self) -> usize {
        self.users.iter().collect::<HashSet<_>>().len()
    }
}

/// One line of the history report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub ordinal: usize,
    pub timestamp: String,
    pub user: Option<String>,
    pub source_amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub registered_users: usize,
    pub conversions: usize,
}

/// Structured view of a finished session, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryReport {
    pub source_currency: String,
    pub target_currency: String,
    pub entries: Vec<ReportEntry>,
    pub summary: SessionSummary,
}

impl HistoryReport {
    pub fn from_session(
        history: &SessionHistory,
        registry: &UserRegistry,
        source_currency: &str,
        target_currency: &str,
    ) -> Self {
        let entries = history
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| ReportEntry {
                ordinal: i + 1,
                timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                user: record.user.clone(),
                source_amount: record.source_amount,
                converted_amount: record.converted_amount,
                rate: record.rate,
            })
            .collect();

        Self {
            source_currency: source_currency.to_string(),
            target_currency: target_currency.to_string(),
            entries,
            summary: SessionSummary {
                registered_users: registry.distinct_count(),
                conversions: history.len(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Short notice for the user-visible channel.
    pub fn summary_notice(&self) -> String {
        if self.is_empty() {
            return "No conversions were made in this session.".to_string();
        }
        format!(
            "Session summary: {} registered user(s), {} conversion(s). The detailed history was written to the diagnostics output.",
            self.summary.registered_users, self.summary.conversions
        )
    }
}
