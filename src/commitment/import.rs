//! IMPORT: records agent and file references at the commitment's position.

use super::definition::malformed;
use super::ApplyContext;
use crate::book::CommitmentBlock;
use crate::error::Result;
use crate::links::{classify_import_target, ImportTarget};
use crate::requirements::AgentModelRequirements;

/// Classify the target and append it to the matching list.
///
/// Agent URLs are checked before generic URLs and file paths, so an agent page
/// is never imported as a plain file.
pub fn apply_import(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    let target = block.content.trim();
    if target.is_empty() {
        return Ok(requirements);
    }

    match classify_import_target(target) {
        Some(ImportTarget::Agent(url)) => requirements.imported_agent_urls.push(url),
        Some(ImportTarget::File(url)) => requirements.imported_file_urls.push(url),
        None => {
            return Err(malformed(
                block,
                format!(
                    "IMPORT target '{}' is neither an agent URL, a URL nor a file path",
                    target
                ),
            ))
        }
    }
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::CommitmentKind;
    use crate::error::BookError;

    fn import(content: &str) -> Result<AgentModelRequirements> {
        apply_import(
            AgentModelRequirements::new(),
            &CommitmentBlock::synthetic(CommitmentKind::Import, content),
            ApplyContext::default(),
        )
    }

    #[test]
    fn agent_url_goes_to_imported_agents() {
        let r = import("https://s6.ptbk.io/benjamin-white").unwrap();
        assert_eq!(r.imported_agent_urls, vec!["https://s6.ptbk.io/benjamin-white"]);
        assert!(r.imported_file_urls.is_empty());
    }

    #[test]
    fn file_path_and_file_url_go_to_imported_files() {
        assert_eq!(import("./notes.txt").unwrap().imported_file_urls, vec!["./notes.txt"]);
        assert_eq!(
            import("https://example.com/handbook.pdf").unwrap().imported_file_urls,
            vec!["https://example.com/handbook.pdf"]
        );
    }

    #[test]
    fn empty_import_is_a_no_op() {
        let r = import("   ").unwrap();
        assert_eq!(r, AgentModelRequirements::new());
    }

    #[test]
    fn prose_fails_with_content_and_block() {
        let err = import("not a url").unwrap_err();
        assert!(matches!(err, BookError::MalformedCommitment { .. }));
        let message = err.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("IMPORT not a url"));
    }
}
