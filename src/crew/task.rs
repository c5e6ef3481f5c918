//! Task descriptions for the two steps

use super::agent::Agent;

/// Stand-in draft handed to the writing task.
///
/// The writer's description embeds this instead of the twin's real output; the
/// writer only sees the draft through the sequential context. Likely a defect.
pub const DRAFT_PLACEHOLDER: &str = "{'answer': '<short answer>', 'support': '<supporting paragraph>'}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
    /// Role of the agent that runs this task
    pub agent_role: String,
}

impl Task {
    pub fn new(agent: &Agent, description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent_role: agent.role.clone(),
        }
    }

    /// User message sent to the model for this task
    pub fn prompt(&self, context: Option<&str>) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description.trim_end(),
            self.expected_output.trim()
        );

        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(context);
        }

        prompt
    }
}

/// First step: draft an answer in Johnson's voice
pub fn response_task(agent: &Agent, question: &str) -> Task {
    let description = format!(
        "Question: {question}

Your task (on behalf of Johnson Wang):
1. Read `information.txt` to learn Johnson's background and perspective.
2. Produce a concise first-person answer (2-3 sentences) that Johnson could send in reply.
3. Provide a short supporting paragraph (3-4 sentences) that explains the reasoning or details.

Keep the reply honest, try not to invent ideas that are out of the scope of Johnson's knowledge (PhD level knowledge).
"
    );

    Task::new(
        agent,
        description,
        "A short structured text containing the answer to the question",
    )
}

/// Second step: rewrite `draft` formally and save it as `reply_file`
pub fn writing_task(agent: &Agent, draft: &str, reply_file: &str) -> Task {
    let description = format!(
        "You are given a short draft response (from Johnson's twin agent).

Input (draft) to use:
{draft}

Your task:
1. Convert the draft into a concise, formal, first-person reply (2-4 sentences).
2. Preserve the factual content and citations from the draft; do not invent facts.
3. Optionally provide a single short formal context paragraph if needed.
4. Save the final reply as '{reply_file}' and return a short confirmation.
"
    );

    Task::new(
        agent,
        description,
        format!("A formal first-person reply saved to '{reply_file}' and a short status message."),
    )
}
