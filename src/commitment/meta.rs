//! META commitments and BOOK VERSION.

use super::definition::malformed;
use super::ApplyContext;
use crate::book::CommitmentBlock;
use crate::error::Result;
use crate::requirements::AgentModelRequirements;

fn set_meta(
    mut requirements: AgentModelRequirements,
    key: &str,
    value: &str,
) -> AgentModelRequirements {
    requirements.meta.insert(key.to_string(), value.to_string());
    requirements
}

pub fn apply_meta_image(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(set_meta(requirements, "image", &block.content))
}

pub fn apply_meta_color(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(set_meta(requirements, "color", &block.content))
}

pub fn apply_meta_font(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(set_meta(requirements, "font", &block.content))
}

pub fn apply_meta_link(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    requirements.links.push(block.content.clone());
    Ok(requirements)
}

/// `META <KEY> <value>`; the key is lowercased.
pub fn apply_meta(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    let Some((key, value)) = block.content.split_once(char::is_whitespace) else {
        return Err(malformed(block, "META expects a key followed by a value"));
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(malformed(block, "META expects a key followed by a value"));
    }
    Ok(set_meta(requirements, &key.to_lowercase(), value))
}

pub fn apply_book_version(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(set_meta(requirements, "book_version", &block.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::CommitmentKind;

    #[test]
    fn generic_meta_uses_first_word_as_key() {
        let r = apply_meta(
            AgentModelRequirements::new(),
            &CommitmentBlock::synthetic(CommitmentKind::Meta, "TAGLINE Your friendly accountant"),
            ApplyContext::default(),
        )
        .unwrap();
        assert_eq!(r.meta.get("tagline").map(String::as_str), Some("Your friendly accountant"));
    }

    #[test]
    fn generic_meta_without_value_is_malformed() {
        assert!(apply_meta(
            AgentModelRequirements::new(),
            &CommitmentBlock::synthetic(CommitmentKind::Meta, "TAGLINE"),
            ApplyContext::default(),
        )
        .is_err());
    }

    #[test]
    fn links_accumulate() {
        let r = apply_meta_link(
            AgentModelRequirements::new(),
            &CommitmentBlock::synthetic(CommitmentKind::MetaLink, "https://a.io"),
            ApplyContext::default(),
        )
        .unwrap();
        let r = apply_meta_link(
            r,
            &CommitmentBlock::synthetic(CommitmentKind::MetaLink, "https://b.io"),
            ApplyContext::default(),
        )
        .unwrap();
        assert_eq!(r.links, vec!["https://a.io", "https://b.io"]);
    }
}
