//! Completion context assembly.
//!
//! Converts the prior turns of a timeline into the role-tagged entry list
//! handed to the completion service. A fixed persona preamble and
//! acknowledgement pair is prepended on every call, anchoring the
//! assistant's behavior identically regardless of how much history exists.
//! Error turns are excluded entirely -- they exist only for local display.

use synapse_types::completion::{ContextEntry, ContextRole};
use synapse_types::turn::{Turn, TurnKind};

/// Fixed persona/instruction text prepended as the first (user-role)
/// context entry.
pub const PERSONA_PREAMBLE: &str = r#"You are an expert Prompt Engineering Assistant. Your goal is to help users craft high-quality, effective prompts for Large Language Models (LLMs).

When a user provides an idea, keywords, or a draft prompt, your tasks are to:
1. Analyze their input.
2. If the input is too vague, ask clarifying questions to understand their goal, target audience, desired output format, style, or any constraints.
3. Offer specific, actionable suggestions to improve their prompt. This might include:
    - Adding more context or detail.
    - Specifying the desired role for the LLM (e.g., "Act as a historian...").
    - Defining the output format (e.g., "Provide the answer as a JSON object...", "Write a blog post...").
    - Suggesting techniques like chain-of-thought, few-shot examples, or negative constraints.
    - Improving clarity, conciseness, or specificity.
4. Provide alternative phrasings or complete revised prompts if appropriate.
5. Explain the reasoning behind your suggestions - why will these changes lead to a better output from an LLM?
6. Maintain a helpful, encouraging, and expert persona.
7. If the user asks for a prompt for a specific task (e.g., "write a marketing email"), help them construct that prompt step-by-step, rather than just writing the email for them. Your focus is on *prompt construction*.

Do not generate the content that the user's final prompt would generate. Instead, help them write the prompt itself.
If the user's input is very short or just keywords, you might start by offering a few diverse example prompts they could build upon, or ask them to elaborate on their goal.
Always aim to be conversational and guide the user through the prompt refinement process."#;

/// Fixed acknowledgement prepended as the second (model-role) context
/// entry.
pub const PREAMBLE_ACK: &str =
    "Okay, I'm ready to help you craft an excellent prompt! What idea or draft prompt do you have in mind?";

/// Assemble the completion context from prior turns.
///
/// Pure function: `UserInput` maps to the user role, `ModelReply` to the
/// model role, and `Error` turns are dropped. No truncation or windowing
/// happens here; a service-side context cap surfaces as a gateway failure.
pub fn assemble(prior_turns: &[Turn]) -> Vec<ContextEntry> {
    let mut entries = Vec::with_capacity(prior_turns.len() + 2);
    entries.push(ContextEntry {
        role: ContextRole::User,
        text: PERSONA_PREAMBLE.to_string(),
    });
    entries.push(ContextEntry {
        role: ContextRole::Model,
        text: PREAMBLE_ACK.to_string(),
    });

    for turn in prior_turns {
        let role = match turn.kind {
            TurnKind::UserInput => ContextRole::User,
            TurnKind::ModelReply => ContextRole::Model,
            TurnKind::Error => continue,
        };
        entries.push(ContextEntry {
            role,
            text: turn.text.clone(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_yields_preamble_pair() {
        let entries = assemble(&[]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, ContextRole::User);
        assert_eq!(entries[0].text, PERSONA_PREAMBLE);
        assert_eq!(entries[1].role, ContextRole::Model);
        assert_eq!(entries[1].text, PREAMBLE_ACK);
    }

    #[test]
    fn test_turns_mapped_to_roles_in_order() {
        let turns = vec![
            Turn::user_input("Write a tagline".to_string()),
            Turn::model_reply("How about: ...".to_string()),
            Turn::user_input("Make it shorter".to_string()),
        ];
        let entries = assemble(&turns);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].role, ContextRole::User);
        assert_eq!(entries[2].text, "Write a tagline");
        assert_eq!(entries[3].role, ContextRole::Model);
        assert_eq!(entries[4].role, ContextRole::User);
        assert_eq!(entries[4].text, "Make it shorter");
    }

    #[test]
    fn test_error_turns_excluded() {
        let turns = vec![
            Turn::user_input("Hello".to_string()),
            Turn::error("Oops! Something went wrong".to_string()),
            Turn::model_reply("Hi".to_string()),
        ];
        let entries = assemble(&turns);
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| !e.text.contains("Oops")));
    }

    #[test]
    fn test_preamble_anchors_every_call() {
        let once = assemble(&[Turn::user_input("a".to_string())]);
        let twice = assemble(&[
            Turn::user_input("a".to_string()),
            Turn::model_reply("b".to_string()),
        ]);
        assert_eq!(once[0], twice[0]);
        assert_eq!(once[1], twice[1]);
    }
}
