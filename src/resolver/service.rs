//! Agent reference resolver.
//!
//! Every call moves through `IDLE -> RESOLVING(key)` and ends `RESOLVED`,
//! `FAILED` or `CYCLE_DETECTED`. Failures never propagate as errors: they are
//! recorded as [`ReferenceResolutionIssue`]s in the caller's scope and, unless
//! the scope is local-only, in the resolver's own collector. The call returns
//! `None`.

use super::cache::{agent_keys, file_key, reference_key, CachedLookup, ResolverCache};
use super::http::HttpBookFetcher;
use super::issues::{IssueReason, IssueSink, ReferenceResolutionIssue};
use super::lookup::{AgentReferenceLookup, CollectionReferenceLookup};
use super::scope::ResolutionScope;
use crate::collection::AgentCollection;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::identity::{AgentIdentity, ResolvedAgent};
use crate::profile::AgentProfile;
use crate::requirements::{AgentCapability, ResolvedTeammate};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(10);

/// How cycles found while resolving are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleReport {
    Issue,
    Silent,
}

pub struct AgentReferenceResolver {
    lookup: Arc<dyn AgentReferenceLookup>,
    cache: Arc<ResolverCache>,
    timeout: Duration,
    unresolved: IssueSink,
}

impl AgentReferenceResolver {
    pub fn new(lookup: Arc<dyn AgentReferenceLookup>) -> Self {
        Self {
            lookup,
            cache: Arc::new(ResolverCache::new()),
            timeout: DEFAULT_RESOLUTION_TIMEOUT,
            unresolved: IssueSink::new(),
        }
    }

    /// Resolver over a collection, wired from configuration.
    pub fn from_config(collection: Arc<dyn AgentCollection>, config: &ResolverConfig) -> Result<Self> {
        let mut lookup = CollectionReferenceLookup::new(collection);
        if let Some(url) = &config.local_server_url {
            lookup = lookup.with_local_server_url(url)?;
        }
        if config.remote_fetch {
            lookup = lookup.with_fetcher(HttpBookFetcher::new().with_timeout(config.timeout()));
        }
        if let Some(dir) = &config.file_base_dir {
            lookup = lookup.with_file_base_dir(dir);
        }
        Ok(Self::new(Arc::new(lookup)).with_timeout(config.timeout()))
    }

    /// Share a cache, typically with an [`InvalidatingAgentCollection`](crate::collection::InvalidatingAgentCollection).
    pub fn with_cache(mut self, cache: Arc<ResolverCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> Arc<ResolverCache> {
        self.cache.clone()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve an agent reference, or record why it could not be resolved.
    pub async fn resolve(&self, reference: &str, scope: &ResolutionScope) -> Option<ResolvedAgent> {
        self.resolve_reporting(reference, scope, CycleReport::Issue).await
    }

    /// Like [`resolve`](Self::resolve), but a reference back into the current
    /// path is skipped without an issue. Used for the implicit base agent.
    pub(crate) async fn resolve_quietly(
        &self,
        reference: &str,
        scope: &ResolutionScope,
    ) -> Option<ResolvedAgent> {
        self.resolve_reporting(reference, scope, CycleReport::Silent).await
    }

    pub async fn resolve_identity(
        &self,
        reference: &str,
        scope: &ResolutionScope,
    ) -> Option<AgentIdentity> {
        self.resolve(reference, scope).await.map(|agent| agent.identity)
    }

    async fn resolve_reporting(
        &self,
        reference: &str,
        scope: &ResolutionScope,
        cycles: CycleReport,
    ) -> Option<ResolvedAgent> {
        let reference = reference.trim();
        if reference.is_empty() {
            self.record(scope, reference, IssueReason::InvalidReference, "empty reference");
            return None;
        }

        let key = reference_key(reference);
        if scope.contains(&key) {
            self.report_cycle(scope, reference, cycles);
            return None;
        }

        let agent = match self.cache.get(&key) {
            Some(CachedLookup::Agent(agent)) => {
                debug!(key = %key, "Resolver cache hit");
                agent
            }
            Some(CachedLookup::Missing) => {
                debug!(key = %key, "Resolver cache hit (missing)");
                self.record(scope, reference, IssueReason::NotFound, "agent not found");
                return None;
            }
            Some(CachedLookup::File(_)) | None => {
                debug!(key = %key, "Resolver cache miss");
                self.lookup_agent(reference, &key, scope).await?
            }
        };

        if agent_keys(reference, &agent).iter().any(|key| scope.contains(key)) {
            self.report_cycle(scope, reference, cycles);
            return None;
        }
        Some(agent)
    }

    async fn lookup_agent(
        &self,
        reference: &str,
        key: &str,
        scope: &ResolutionScope,
    ) -> Option<ResolvedAgent> {
        let generation = self.cache.generation();
        match tokio::time::timeout(self.timeout, self.lookup.lookup(reference)).await {
            Err(_) => {
                let message = format!("lookup exceeded {} ms", self.timeout.as_millis());
                self.record(scope, reference, IssueReason::Timeout, message);
                None
            }
            Ok(Err(err)) => {
                self.record(scope, reference, IssueReason::Fetch, err.to_string());
                None
            }
            Ok(Ok(None)) => {
                self.cache.insert(key, CachedLookup::Missing, generation);
                self.record(scope, reference, IssueReason::NotFound, "agent not found");
                None
            }
            Ok(Ok(Some(agent))) => {
                for agent_key in agent_keys(reference, &agent) {
                    self.cache
                        .insert(agent_key, CachedLookup::Agent(agent.clone()), generation);
                }
                Some(agent)
            }
        }
    }

    /// Text of an imported file, or `None` with an issue recorded.
    pub async fn fetch_file(&self, reference: &str, scope: &ResolutionScope) -> Option<String> {
        let reference = reference.trim();
        let key = file_key(reference);
        match self.cache.get(&key) {
            Some(CachedLookup::File(text)) => return Some(text),
            Some(CachedLookup::Missing) => {
                self.record(scope, reference, IssueReason::NotFound, "file not found");
                return None;
            }
            _ => {}
        }

        let generation = self.cache.generation();
        match tokio::time::timeout(self.timeout, self.lookup.fetch_file(reference)).await {
            Err(_) => {
                let message = format!("fetch exceeded {} ms", self.timeout.as_millis());
                self.record(scope, reference, IssueReason::Timeout, message);
                None
            }
            Ok(Err(err)) => {
                self.record(scope, reference, IssueReason::Fetch, err.to_string());
                None
            }
            Ok(Ok(None)) => {
                self.cache.insert(key, CachedLookup::Missing, generation);
                self.record(scope, reference, IssueReason::NotFound, "file not found");
                None
            }
            Ok(Ok(Some(text))) => {
                self.cache.insert(key, CachedLookup::File(text.clone()), generation);
                Some(text)
            }
        }
    }

    /// Resolve every team capability concurrently; the output keeps the input
    /// order and replaces each team entry in place.
    ///
    /// Teammates are not inlined into the agent, so they resolve outside the
    /// current path.
    pub async fn list_team_capabilities(
        &self,
        capabilities: Vec<AgentCapability>,
        scope: &ResolutionScope,
    ) -> Vec<AgentCapability> {
        let scope = scope.detached();
        let resolutions = capabilities.into_iter().map(|capability| {
            let scope = &scope;
            async move {
                match capability {
                    AgentCapability::Team { teammate, .. } => {
                        let resolved = self.resolve(&teammate.url, scope).await.map(|agent| {
                            let profile = AgentProfile::from_source(&agent.source);
                            ResolvedTeammate {
                                identity: agent.identity,
                                title: profile.title,
                                description: profile.description,
                            }
                        });
                        AgentCapability::Team { teammate, resolved }
                    }
                    other => other,
                }
            }
        });
        join_all(resolutions).await
    }

    /// Issues recorded by every call since the last take.
    pub fn list_unresolved_references(&self) -> Vec<ReferenceResolutionIssue> {
        self.unresolved.snapshot()
    }

    pub fn take_unresolved_references(&self) -> Vec<ReferenceResolutionIssue> {
        self.unresolved.take()
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    fn report_cycle(&self, scope: &ResolutionScope, reference: &str, cycles: CycleReport) {
        match cycles {
            CycleReport::Issue => self.record(
                scope,
                reference,
                IssueReason::Cycle,
                format!("reference cycle through {}", scope.path().join(" -> ")),
            ),
            CycleReport::Silent => debug!(reference, "Skipping reference back into the current path"),
        }
    }

    fn record(
        &self,
        scope: &ResolutionScope,
        reference: &str,
        reason: IssueReason,
        message: impl Into<String>,
    ) {
        let issue = ReferenceResolutionIssue::new(reference, reason, message, scope.location());
        warn!(reference, reason = %reason, "Unresolved reference: {}", issue.message);
        if scope.is_local_only() {
            scope.record(issue);
        } else {
            scope.record(issue.clone());
            self.unresolved.push(issue);
        }
    }
}
