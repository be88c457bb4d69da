//! Reference lookup port and its collection-backed adapter.

use super::http::HttpBookFetcher;
use crate::book::parse_book;
use crate::collection::AgentCollection;
use crate::error::{BookError, Result};
use crate::identity::{agent_name_from_title, normalize_agent_name, AgentIdentity, ResolvedAgent};
use crate::links;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Turns a reference into an agent or a file body.
///
/// `Ok(None)` means the target does not exist; errors are failed attempts.
#[async_trait]
pub trait AgentReferenceLookup: Send + Sync {
    async fn lookup(&self, reference: &str) -> Result<Option<ResolvedAgent>>;

    async fn fetch_file(&self, reference: &str) -> Result<Option<String>>;
}

/// Lookup over a local [`AgentCollection`].
///
/// Names and permanent ids are looked up in the collection, as are URLs on
/// the local server. Other URLs go to the HTTP fetcher when one is set. File
/// paths are read relative to `file_base_dir`.
pub struct CollectionReferenceLookup {
    collection: Arc<dyn AgentCollection>,
    local_server_url: Option<Url>,
    fetcher: Option<HttpBookFetcher>,
    file_base_dir: Option<PathBuf>,
}

impl CollectionReferenceLookup {
    pub fn new(collection: Arc<dyn AgentCollection>) -> Self {
        Self {
            collection,
            local_server_url: None,
            fetcher: None,
            file_base_dir: None,
        }
    }

    pub fn with_local_server_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| BookError::Config(format!("Invalid local server URL '{}': {}", url, e)))?;
        self.local_server_url = Some(parsed);
        Ok(self)
    }

    pub fn with_fetcher(mut self, fetcher: HttpBookFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_file_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_base_dir = Some(dir.into());
        self
    }

    fn is_local_url(&self, url: &Url) -> bool {
        let Some(base) = &self.local_server_url else {
            return false;
        };
        url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default()
            && url.path().starts_with(base.path().trim_end_matches('/'))
    }

    async fn lookup_local(&self, reference: &str) -> Result<Option<AgentIdentity>> {
        let wanted = normalize_agent_name(reference);
        let agents = self.collection.list_agents().await?;
        Ok(agents.into_iter().find(|identity| {
            normalize_agent_name(&identity.agent_name) == wanted
                || identity.permanent_id.as_deref() == Some(reference.trim())
        }))
    }

    async fn load_local(&self, reference: &str, url: Option<String>) -> Result<Option<ResolvedAgent>> {
        let Some(identity) = self.lookup_local(reference).await? else {
            return Ok(None);
        };
        match self.collection.get_agent_source(&identity.agent_name).await {
            Ok(source) => Ok(Some(ResolvedAgent {
                identity,
                source,
                url,
            })),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn load_remote(&self, url: &str) -> Result<Option<ResolvedAgent>> {
        let Some(fetcher) = &self.fetcher else {
            tracing::debug!(url, "Remote fetching disabled");
            return Ok(None);
        };
        let Some(source) = fetcher.fetch_agent_source(url).await? else {
            return Ok(None);
        };

        let agent_name = match parse_book(&source).title {
            Some(title) => agent_name_from_title(&title),
            None => links::agent_slug_from_url(url).unwrap_or_else(|| url.to_string()),
        };
        Ok(Some(ResolvedAgent {
            identity: AgentIdentity::new(agent_name, None),
            source,
            url: Some(url.to_string()),
        }))
    }

    fn resolve_path(&self, reference: &str) -> Option<PathBuf> {
        if let Some(rest) = reference.strip_prefix("~/") {
            let home = directories::BaseDirs::new()?.home_dir().to_path_buf();
            return Some(home.join(rest));
        }
        let path = Path::new(reference);
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        self.file_base_dir.as_ref().map(|base| base.join(path))
    }
}

#[async_trait]
impl AgentReferenceLookup for CollectionReferenceLookup {
    async fn lookup(&self, reference: &str) -> Result<Option<ResolvedAgent>> {
        let reference = reference.trim();
        match Url::parse(reference) {
            Ok(url) if links::is_valid_url(reference) => {
                if self.is_local_url(&url) {
                    match links::agent_slug_from_url(reference) {
                        Some(slug) => self.load_local(&slug, Some(reference.to_string())).await,
                        None => Ok(None),
                    }
                } else {
                    self.load_remote(reference).await
                }
            }
            _ => self.load_local(reference, None).await,
        }
    }

    async fn fetch_file(&self, reference: &str) -> Result<Option<String>> {
        let reference = reference.trim();
        if links::is_valid_url(reference) {
            return match &self.fetcher {
                Some(fetcher) => fetcher.fetch_text(reference).await,
                None => Ok(None),
            };
        }

        let Some(path) = self.resolve_path(reference) else {
            tracing::debug!(reference, "No base directory for file import");
            return Ok(None);
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BookError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::InMemoryAgentCollection;

    async fn lookup_with(sources: &[&str]) -> CollectionReferenceLookup {
        let collection = InMemoryAgentCollection::with_sources(sources.iter().copied())
            .await
            .unwrap();
        CollectionReferenceLookup::new(Arc::new(collection))
            .with_local_server_url("http://localhost:4440")
            .unwrap()
    }

    #[tokio::test]
    async fn finds_agents_by_name_id_and_local_url() {
        let lookup = lookup_with(&["Benjamin White\nPERSONA Support lead."]).await;

        let by_name = lookup.lookup("Benjamin White").await.unwrap().unwrap();
        assert_eq!(by_name.identity.agent_name, "benjamin-white");

        let id = by_name.identity.permanent_id.clone().unwrap();
        let by_id = lookup.lookup(&id).await.unwrap().unwrap();
        assert_eq!(by_id.identity, by_name.identity);

        let by_url = lookup
            .lookup("http://localhost:4440/agents/benjamin-white")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_url.identity, by_name.identity);
        assert_eq!(by_url.url.as_deref(), Some("http://localhost:4440/agents/benjamin-white"));
    }

    #[tokio::test]
    async fn remote_urls_without_fetcher_are_missing() {
        let lookup = lookup_with(&["Anna"]).await;
        assert!(lookup.lookup("https://s6.ptbk.io/anna").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reads_files_under_the_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "Office hours are 9-5.").unwrap();
        let lookup = lookup_with(&[]).await.with_file_base_dir(dir.path());

        assert_eq!(
            lookup.fetch_file("./notes.txt").await.unwrap().as_deref(),
            Some("Office hours are 9-5.")
        );
        assert!(lookup.fetch_file("./missing.txt").await.unwrap().is_none());
    }
}
