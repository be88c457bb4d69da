//! Commitments that set scalar knobs rather than adding prose.

use super::definition::malformed;
use super::ApplyContext;
use crate::book::CommitmentBlock;
use crate::error::Result;
use crate::links;
use crate::requirements::{AgentModelRequirements, MessageRole, SampleMessage};

/// `FROM` values that switch inheritance off.
pub const VOID_PARENTS: &[&str] = &["VOID", "NONE", "NOTHING", "NULL"];

pub fn is_void_parent(value: &str) -> bool {
    VOID_PARENTS
        .iter()
        .any(|void| value.trim().eq_ignore_ascii_case(void))
}

pub fn apply_model(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    for line in block.content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (parameter, value) = match line.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_ascii_uppercase().replace('-', "_"), rest.trim()),
            None => (line.to_ascii_uppercase(), ""),
        };

        match parameter.as_str() {
            "NAME" => {
                if value.is_empty() {
                    return Err(malformed(block, "MODEL NAME needs a model name"));
                }
                requirements.model_name = Some(value.to_string());
            }
            "TEMPERATURE" => {
                requirements.temperature = Some(parse_number(block, "TEMPERATURE", value)?);
            }
            "TOP_P" => {
                requirements.top_p = Some(parse_number(block, "TOP_P", value)?);
            }
            "MAX_TOKENS" => {
                requirements.max_tokens = Some(parse_number(block, "MAX_TOKENS", value)?);
            }
            "SEED" => {
                requirements.seed = Some(parse_number(block, "SEED", value)?);
            }
            _ => requirements.model_name = Some(line.to_string()),
        }
    }
    Ok(requirements)
}

fn parse_number<T: std::str::FromStr>(
    block: &CommitmentBlock,
    parameter: &str,
    value: &str,
) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        malformed(
            block,
            format!("MODEL {} expects a number, got '{}'", parameter, value),
        )
    })
}

pub fn apply_language(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    requirements.language = Some(block.content.clone());
    Ok(requirements)
}

pub fn apply_initial_message(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    requirements.initial_message = Some(block.content.clone());
    Ok(requirements)
}

pub fn apply_user_message(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(push_sample(requirements, MessageRole::User, block))
}

pub fn apply_agent_message(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(push_sample(requirements, MessageRole::Agent, block))
}

fn push_sample(
    mut requirements: AgentModelRequirements,
    role: MessageRole,
    block: &CommitmentBlock,
) -> AgentModelRequirements {
    requirements.sample_messages.push(SampleMessage {
        role,
        content: block.content.clone(),
    });
    requirements
}

pub fn apply_note(
    requirements: AgentModelRequirements,
    _block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(requirements)
}

pub fn apply_delete(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    Ok(requirements.remove_sections_matching(&block.content))
}

pub fn apply_open(
    mut requirements: AgentModelRequirements,
    _block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    requirements.is_closed = false;
    Ok(requirements)
}

pub fn apply_closed(
    mut requirements: AgentModelRequirements,
    _block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    requirements.is_closed = true;
    Ok(requirements)
}

/// Record the declared parent. Composition happens before the fold.
pub fn apply_from(
    mut requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    _context: ApplyContext,
) -> Result<AgentModelRequirements> {
    let parent = block.content.trim();
    if is_void_parent(parent) {
        requirements.parent_agent_url = None;
        return Ok(requirements);
    }
    let is_bare_name = !parent.is_empty() && !parent.chars().any(char::is_whitespace);
    if !links::is_valid_url(parent) && !is_bare_name {
        return Err(malformed(
            block,
            "FROM expects an agent URL, an agent name or VOID",
        ));
    }
    requirements.parent_agent_url = Some(parent.to_string());
    Ok(requirements)
}
