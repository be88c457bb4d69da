//! Generation-tagged cache of resolution results.
//!
//! Entries are tagged with the generation that was current when their lookup
//! started. Invalidation bumps the generation, so results of lookups that were
//! in flight during an invalidation are stored but never read.

use crate::identity::{normalize_agent_name, AgentIdentity, ResolvedAgent};
use crate::links;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// A memoized lookup outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedLookup {
    Agent(ResolvedAgent),
    File(String),
    /// The reference was looked up and does not exist.
    Missing,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    generation: u64,
    value: CachedLookup,
}

#[derive(Debug, Default)]
pub struct ResolverCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    generation: AtomicU64,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Current-generation entry for `key`.
    pub fn get(&self, key: &str) -> Option<CachedLookup> {
        let generation = self.generation();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| entry.generation == generation)
            .map(|entry| entry.value.clone())
    }

    /// Store a result computed during `generation`.
    pub fn insert(&self, key: impl Into<String>, value: CachedLookup, generation: u64) {
        self.entries
            .write()
            .insert(key.into(), CacheEntry { generation, value });
    }

    /// Drop every entry and start a new generation.
    pub fn invalidate(&self) {
        let mut entries = self.entries.write();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        entries.clear();
        tracing::debug!(generation, "Invalidated resolver cache");
    }

    /// Number of entries readable in the current generation.
    pub fn len(&self) -> usize {
        let generation = self.generation();
        self.entries
            .read()
            .values()
            .filter(|entry| entry.generation == generation)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key of a reference as written: `url:` for URLs, `name:` otherwise.
pub fn reference_key(reference: &str) -> String {
    let reference = reference.trim();
    if links::is_valid_url(reference) {
        format!("url:{}", reference.trim_end_matches('/'))
    } else {
        format!("name:{}", normalize_agent_name(reference))
    }
}

pub fn file_key(reference: &str) -> String {
    format!("file:{}", reference.trim())
}

/// Every key a resolved agent is known under.
pub fn agent_keys(reference: &str, agent: &ResolvedAgent) -> Vec<String> {
    let mut keys = vec![reference_key(reference)];
    keys.extend(identity_keys(&agent.identity));
    if let Some(url) = &agent.url {
        keys.push(reference_key(url));
    }
    let mut seen = HashSet::new();
    keys.retain(|key| seen.insert(key.clone()));
    keys
}

fn identity_keys(identity: &AgentIdentity) -> Vec<String> {
    let mut keys = vec![format!("name:{}", normalize_agent_name(&identity.agent_name))];
    if let Some(id) = &identity.permanent_id {
        keys.push(format!("id:{}", id));
    }
    keys
}
