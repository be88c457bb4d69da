//! Free-text commitments that become system message sections.

use super::ApplyContext;
use crate::book::CommitmentBlock;
use crate::error::Result;
use crate::requirements::{AgentModelRequirements, SystemMessageSection};

/// Append the block content as a section labelled by its kind.
pub fn append_section(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(requirements.push_section(SystemMessageSection::new(block.kind, block.content.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::CommitmentKind;

    #[test]
    fn later_sections_augment_earlier_ones() {
        let requirements = AgentModelRequirements::new();
        let requirements = append_section(
            requirements,
            &CommitmentBlock::synthetic(CommitmentKind::Rule, "Be brief."),
            ApplyContext::default(),
        )
        .unwrap();
        let requirements = append_section(
            requirements,
            &CommitmentBlock::synthetic(CommitmentKind::Rule, "Cite sources."),
            ApplyContext::default(),
        )
        .unwrap();

        let contents: Vec<_> = requirements.sections.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["Be brief.", "Cite sources."]);
    }
}
