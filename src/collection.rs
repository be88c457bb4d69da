//! Agent collection: the storage port the resolver reads agents from.

pub mod contract;
pub mod invalidating;
pub mod memory;

pub use contract::AgentCollection;
pub use invalidating::InvalidatingAgentCollection;
pub use memory::InMemoryAgentCollection;
