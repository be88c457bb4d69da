//! Per-compile resolution scope.

use super::issues::{IssueLocation, IssueSink, ReferenceResolutionIssue};

/// Explicit context threaded through one compile.
///
/// Holds the keys of the agents currently being composed (the path from the
/// root agent to here), the issue sink shared by the whole compile and the
/// commitment being resolved. Child scopes share the sink.
#[derive(Debug, Clone, Default)]
pub struct ResolutionScope {
    path: Vec<String>,
    issues: IssueSink,
    location: Option<IssueLocation>,
    /// Issues stay in this scope's sink and skip the resolver's collector.
    local_only: bool,
}

impl ResolutionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root scope for lookups that are not part of a compile, such as editor
    /// diagnostics. Its issues never reach
    /// [`list_unresolved_references`](super::AgentReferenceResolver::list_unresolved_references).
    pub fn local_only() -> Self {
        Self {
            local_only: true,
            ..Self::default()
        }
    }

    /// Root scope for an agent already known under `keys`.
    pub fn seeded<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scope = Self::new();
        for key in keys {
            let key = key.into();
            if !scope.path.contains(&key) {
                scope.path.push(key);
            }
        }
        scope
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path.iter().any(|entry| entry == key)
    }

    /// Child scope with `key` on the path, or `None` when it already is.
    pub fn enter(&self, key: impl Into<String>) -> Option<Self> {
        self.enter_all([key.into()])
    }

    /// Child scope with all `keys` on the path, or `None` when any already is.
    pub fn enter_all<I>(&self, keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut child = self.clone();
        for key in keys {
            if self.contains(&key) {
                return None;
            }
            if !child.path.contains(&key) {
                child.path.push(key);
            }
        }
        child.location = None;
        Some(child)
    }

    /// Same path and sink, resolving from `location`.
    pub fn at(&self, location: IssueLocation) -> Self {
        let mut scope = self.clone();
        scope.location = Some(location);
        scope
    }

    /// Same sink with an empty path, for references that are not inlined.
    pub fn detached(&self) -> Self {
        Self {
            path: Vec::new(),
            issues: self.issues.clone(),
            location: self.location,
            local_only: self.local_only,
        }
    }

    pub fn is_local_only(&self) -> bool {
        self.local_only
    }

    pub fn location(&self) -> Option<IssueLocation> {
        self.location
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn issues(&self) -> &IssueSink {
        &self.issues
    }

    pub fn record(&self, issue: ReferenceResolutionIssue) {
        self.issues.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::CommitmentKind;
    use crate::resolver::IssueReason;

    #[test]
    fn entering_a_key_twice_is_refused() {
        let root = ResolutionScope::seeded(["name:anna"]);
        let child = root.enter("name:bob").unwrap();
        assert!(child.contains("name:anna"));
        assert!(child.enter("name:anna").is_none());
        assert!(!root.contains("name:bob"));
    }

    #[test]
    fn children_share_the_issue_sink() {
        let root = ResolutionScope::new();
        let child = root
            .enter("name:bob")
            .unwrap()
            .at(IssueLocation {
                kind: CommitmentKind::From,
                line: 2,
            });
        child.record(ReferenceResolutionIssue::new(
            "bob",
            IssueReason::NotFound,
            "missing",
            child.location(),
        ));
        assert_eq!(root.issues().len(), 1);
        assert_eq!(root.issues().snapshot()[0].location.map(|l| l.line), Some(2));
    }

    #[test]
    fn local_only_survives_child_scopes() {
        let root = ResolutionScope::local_only();
        let child = root.enter("name:bob").unwrap().detached();
        assert!(child.is_local_only());
        assert!(!ResolutionScope::seeded(["name:anna"]).is_local_only());
    }
}
