//! Append-only record of what the pipeline decided for one upload.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Load,
    Match,
    Normalize,
    Persist,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Match => "match",
            Self::Normalize => "normalize",
            Self::Persist => "persist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub level: AuditLevel,
    pub stage: Stage,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and emits it as a tracing event.
    pub fn record(&mut self, level: AuditLevel, stage: Stage, message: impl Into<String>) {
        let message = message.into();
        match level {
            AuditLevel::Info => info!(stage = stage.as_str(), "{message}"),
            AuditLevel::Warning => warn!(stage = stage.as_str(), "{message}"),
            AuditLevel::Error => error!(stage = stage.as_str(), "{message}"),
        }
        self.entries.push(AuditEntry {
            level,
            stage,
            message,
        });
    }

    pub fn info(&mut self, stage: Stage, message: impl Into<String>) {
        self.record(AuditLevel::Info, stage, message);
    }

    pub fn warning(&mut self, stage: Stage, message: impl Into<String>) {
        self.record(AuditLevel::Warning, stage, message);
    }

    pub fn error(&mut self, stage: Stage, message: impl Into<String>) {
        self.record(AuditLevel::Error, stage, message);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.count(AuditLevel::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(AuditLevel::Error)
    }

    fn count(&self, level: AuditLevel) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }

    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |entry| entry.stage == stage)
    }
}
