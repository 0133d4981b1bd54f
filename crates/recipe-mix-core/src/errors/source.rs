// ABOUTME: Per-source error types for catalog, vocabulary, and generative collaborators
// ABOUTME: These failures are recovered locally by the engine and surfaced as warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Source Error Types
//!
//! A `SourceError` describes the failure of one collaborator call: a single
//! technique query against the recipe store, the vocabulary load, or a single
//! generative call. The engine never propagates these; each one becomes a
//! zero contribution plus a warning on the response.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Which collaborator a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Structured recipe store
    Catalog,
    /// Master ingredient vocabulary
    Vocabulary,
    /// Generative recipe synthesis
    Generative,
}

impl SourceKind {
    /// Stable lowercase name used in logs and warnings
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Vocabulary => "vocabulary",
            Self::Generative => "generative",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The collaborator returned an error or could not be reached
    Unavailable {
        /// Collaborator that failed
        kind: SourceKind,
        /// Details reported by the collaborator
        details: String,
    },
    /// The call did not finish within its deadline
    Timeout {
        /// Collaborator that timed out
        kind: SourceKind,
        /// Deadline that elapsed, in milliseconds
        timeout_ms: u64,
    },
    /// The caller cancelled the request while the call was outstanding
    Cancelled {
        /// Collaborator whose call was abandoned
        kind: SourceKind,
    },
    /// The collaborator answered with a record that does not fit the schema
    MalformedRecord {
        /// Identifier of the record, when it had one
        record_id: Option<String>,
        /// What was wrong with it
        reason: String,
    },
}

impl SourceError {
    /// Create an "unavailable" error
    #[must_use]
    pub fn unavailable(kind: SourceKind, details: impl Into<String>) -> Self {
        Self::Unavailable {
            kind,
            details: details.into(),
        }
    }

    /// Create a "timeout" error
    #[must_use]
    pub const fn timeout(kind: SourceKind, timeout_ms: u64) -> Self {
        Self::Timeout { kind, timeout_ms }
    }

    /// Create a "cancelled" error
    #[must_use]
    pub const fn cancelled(kind: SourceKind) -> Self {
        Self::Cancelled { kind }
    }

    /// Create a "malformed record" error
    #[must_use]
    pub fn malformed(record_id: Option<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record_id,
            reason: reason.into(),
        }
    }

    /// Collaborator this error belongs to, if it is tied to one
    #[must_use]
    pub const fn kind(&self) -> Option<SourceKind> {
        match self {
            Self::Unavailable { kind, .. } | Self::Timeout { kind, .. } | Self::Cancelled { kind } => {
                Some(*kind)
            }
            Self::MalformedRecord { .. } => None,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { kind, details } => {
                write!(f, "{kind} source unavailable: {details}")
            }
            Self::Timeout { kind, timeout_ms } => {
                write!(f, "{kind} source timed out after {timeout_ms}ms")
            }
            Self::Cancelled { kind } => write!(f, "{kind} call cancelled by caller"),
            Self::MalformedRecord {
                record_id: Some(id),
                reason,
            } => write!(f, "Malformed record '{id}': {reason}"),
            Self::MalformedRecord {
                record_id: None,
                reason,
            } => write!(f, "Malformed record: {reason}"),
        }
    }
}

impl Error for SourceError {}
