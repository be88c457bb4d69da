//! Agent identity types and name normalization.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Identity of a resolved agent.
///
/// `agent_name` may change when the agent is renamed; `permanent_id` does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_id: Option<String>,
}

impl AgentIdentity {
    pub fn new(agent_name: impl Into<String>, permanent_id: Option<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            permanent_id,
        }
    }

    /// Key under which resolution results for this agent are cached.
    pub fn cache_key(&self) -> String {
        match &self.permanent_id {
            Some(id) => format!("id:{}", id),
            None => format!("name:{}", normalize_agent_name(&self.agent_name)),
        }
    }
}

/// A reference target together with its Book source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAgent {
    pub identity: AgentIdentity,
    pub source: String,
    /// URL the agent was fetched from, when it came from a remote server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Normalize an agent name for lookups and cache keys.
///
/// Compatibility-decomposes, drops combining marks, lowercases and joins words
/// with `-`, so `Benjamin White`, `benjamin-white` and `Benjamín_White` all
/// map to `benjamin-white`.
pub fn normalize_agent_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_separator = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Derive a storage name from an agent title: an ASCII kebab-case slug.
pub fn agent_name_from_title(title: &str) -> String {
    let normalized = normalize_agent_name(title);
    let ascii: String = normalized
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let trimmed = ascii.trim_matches('-');
    if trimmed.is_empty() {
        "agent".to_string()
    } else {
        trimmed.split('-').filter(|part| !part.is_empty()).collect::<Vec<_>>().join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_agent_name("Benjamin White"), "benjamin-white");
        assert_eq!(normalize_agent_name("  benjamin-white "), "benjamin-white");
        assert_eq!(normalize_agent_name("Benjamín_White"), "benjamin-white");
    }

    #[test]
    fn strips_combining_marks_of_every_script() {
        assert_eq!(normalize_agent_name("שָׁלוֹם"), normalize_agent_name("שלום"));
        assert_eq!(normalize_agent_name("שָׁלוֹם"), "שלום");
        assert_eq!(normalize_agent_name("a\u{1DC0}\u{0483}b"), "ab");
        assert_eq!(normalize_agent_name("क्षमा"), normalize_agent_name("कषम"));
    }

    #[test]
    fn derives_storage_name_from_title() {
        assert_eq!(agent_name_from_title("Paul Smith & Associés"), "paul-smith-associes");
        assert_eq!(agent_name_from_title("***"), "agent");
    }

    #[test]
    fn cache_key_prefers_permanent_id() {
        let with_id = AgentIdentity::new("Benjamin White", Some("x1".to_string()));
        let without_id = AgentIdentity::new("Benjamin White", None);
        assert_eq!(with_id.cache_key(), "id:x1");
        assert_eq!(without_id.cache_key(), "name:benjamin-white");
    }
}
