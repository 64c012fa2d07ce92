//! Structured diagnostics produced by a render call.
//!
//! The sanitizer never fails. Everything worth telling the caller about (a
//! missing marker, a placeholder in the preamble, a repaired command) is
//! collected here and handed back alongside the document.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `\begin{document}` was not found; template returned verbatim.
    MissingMarker,
    /// The marker occurs more than once; split happened at the first one.
    DuplicateMarker,
    /// Placeholder syntax found in the preamble, which is never substituted.
    PlaceholderInPreamble,
    /// The body could not be substituted; the raw body was repaired instead.
    SubstitutionFailed,
    /// A repair rule rewrote part of the body.
    Repaired { rule: RepairRule, count: usize },
}

/// The ordered repair rules applied to a substituted body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairRule {
    ImageDataOpenBrace,
    ImageOpenBrace,
    FormattingArgument,
    ImageDataCloseBrace,
    BraceBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            kind,
            message: message.into(),
        }
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            kind,
            message: message.into(),
        }
    }

    /// Emits this diagnostic as a tracing event at the matching level.
    pub fn log(&self) {
        match self.level {
            DiagnosticLevel::Error => error!(kind = ?self.kind, "{}", self.message),
            DiagnosticLevel::Warning => warn!(kind = ?self.kind, "{}", self.message),
            DiagnosticLevel::Info => info!(kind = ?self.kind, "{}", self.message),
        }
    }
}
