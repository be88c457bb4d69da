//! Non-fatal resolution failures.

use crate::commitment::CommitmentKind;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    NotFound,
    Cycle,
    Timeout,
    Fetch,
    InvalidReference,
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssueReason::NotFound => "not found",
            IssueReason::Cycle => "reference cycle",
            IssueReason::Timeout => "timed out",
            IssueReason::Fetch => "fetch failed",
            IssueReason::InvalidReference => "invalid reference",
        };
        f.write_str(text)
    }
}

/// Commitment and source line a reference was written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueLocation {
    pub kind: CommitmentKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceResolutionIssue {
    pub reference: String,
    pub reason: IssueReason,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<IssueLocation>,
}

impl ReferenceResolutionIssue {
    pub fn new(
        reference: impl Into<String>,
        reason: IssueReason,
        message: impl Into<String>,
        location: Option<IssueLocation>,
    ) -> Self {
        Self {
            reference: reference.into(),
            reason,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for ReferenceResolutionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.reference, self.reason, self.message)?;
        if let Some(location) = self.location {
            write!(f, " [{} on line {}]", location.kind, location.line)?;
        }
        Ok(())
    }
}

/// Shared, append-only collector of issues. Identical issues are kept once.
#[derive(Debug, Clone, Default)]
pub struct IssueSink {
    issues: Arc<Mutex<Vec<ReferenceResolutionIssue>>>,
}

impl IssueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, issue: ReferenceResolutionIssue) {
        let mut issues = self.issues.lock();
        if !issues.contains(&issue) {
            issues.push(issue);
        }
    }

    pub fn snapshot(&self) -> Vec<ReferenceResolutionIssue> {
        self.issues.lock().clone()
    }

    pub fn take(&self) -> Vec<ReferenceResolutionIssue> {
        std::mem::take(&mut *self.issues.lock())
    }

    pub fn len(&self) -> usize {
        self.issues.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.lock().is_empty()
    }
}
