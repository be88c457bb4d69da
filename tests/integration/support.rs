use agentbook::collection::{AgentCollection, InMemoryAgentCollection, InvalidatingAgentCollection};
use agentbook::resolver::{CollectionReferenceLookup, ResolverCache};
use agentbook::{AgentReferenceResolver, CompileOptions};
use std::path::Path;
use std::sync::Arc;

pub const LOCAL_SERVER: &str = "http://localhost:4440";
pub const ADAM_URL: &str = "http://localhost:4440/adam";

pub fn local_url(name: &str) -> String {
    format!("{}/{}", LOCAL_SERVER, name)
}

/// Collection, resolver and cache wired the way a server would wire them.
pub struct Fixture {
    pub collection: Arc<InvalidatingAgentCollection>,
    pub resolver: Arc<AgentReferenceResolver>,
}

impl Fixture {
    pub async fn new(sources: &[&str]) -> Self {
        Self::build(sources, None).await
    }

    pub async fn with_files(sources: &[&str], file_base_dir: &Path) -> Self {
        Self::build(sources, Some(file_base_dir)).await
    }

    async fn build(sources: &[&str], file_base_dir: Option<&Path>) -> Self {
        let cache = Arc::new(ResolverCache::new());
        let collection = Arc::new(InvalidatingAgentCollection::new(
            Arc::new(InMemoryAgentCollection::new()),
            cache.clone(),
        ));
        for source in sources {
            collection.create_agent(source).await.unwrap();
        }

        let mut lookup = CollectionReferenceLookup::new(collection.clone())
            .with_local_server_url(LOCAL_SERVER)
            .unwrap();
        if let Some(dir) = file_base_dir {
            lookup = lookup.with_file_base_dir(dir);
        }
        let resolver = Arc::new(AgentReferenceResolver::new(Arc::new(lookup)).with_cache(cache));
        Self {
            collection,
            resolver,
        }
    }

    pub fn options(&self) -> CompileOptions {
        CompileOptions::new().with_resolver(self.resolver.clone())
    }
}
