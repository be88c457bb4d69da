//! USE commitments: bind host tools to the agent.

use super::{ApplyContext, CommitmentKind};
use crate::book::CommitmentBlock;
use crate::error::Result;
use crate::requirements::{AgentModelRequirements, SystemMessageSection, ToolBinding};
use serde_json::json;

/// Tool a USE commitment binds, with the sentence describing it to the model.
fn binding_for(kind: CommitmentKind) -> Option<(ToolBinding, &'static str)> {
    let binding = match kind {
        CommitmentKind::UseEmail => (
            ToolBinding::new(
                "send_email",
                "Send an email message",
                json!({
                    "type": "object",
                    "properties": {
                        "to": { "type": "array", "items": { "type": "string" } },
                        "subject": { "type": "string" },
                        "body": { "type": "string" }
                    },
                    "required": ["to", "subject", "body"]
                }),
            ),
            "You can send emails with the `send_email` tool.",
        ),
        CommitmentKind::UseBrowser => (
            ToolBinding::new(
                "fetch_url_content",
                "Fetch the readable content of a web page",
                json!({
                    "type": "object",
                    "properties": { "url": { "type": "string" } },
                    "required": ["url"]
                }),
            ),
            "You can read web pages with the `fetch_url_content` tool.",
        ),
        CommitmentKind::UseSearchEngine => (
            ToolBinding::new(
                "web_search",
                "Search the web",
                json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"]
                }),
            ),
            "You can search the web with the `web_search` tool.",
        ),
        CommitmentKind::UseTime => (
            ToolBinding::new(
                "get_current_time",
                "Get the current date and time",
                json!({
                    "type": "object",
                    "properties": { "timezone": { "type": "string" } }
                }),
            ),
            "You can get the current date and time with the `get_current_time` tool.",
        ),
        _ => return None,
    };
    Some(binding)
}

/// Bind the tool once and append the usage instructions as a section.
pub fn apply_tool_use(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    let Some((binding, sentence)) = binding_for(block.kind) else {
        return Ok(requirements);
    };

    let content = if block.content.is_empty() {
        sentence.to_string()
    } else {
        format!("{} {}", sentence, block.content)
    };
    Ok(requirements
        .bind_tool(binding)
        .push_section(SystemMessageSection::new(block.kind, content)))
}
