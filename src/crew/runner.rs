//! Running a single task against a model

use eyre::{Context, Result};

use super::agent::Agent;
use super::task::Task;
use crate::llm::{ChatClient, ChatMessage, ToolDefinition};

/// Submit a described task for an agent and get unstructured text back
pub trait TaskRunner {
    fn execute(&self, agent: &Agent, task: &Task, context: Option<&str>) -> Result<String>;
}

/// Drives the model/tool loop for one task
pub struct AgentExecutor<C: ChatClient> {
    client: C,
    max_iterations: usize,
}

impl<C: ChatClient> AgentExecutor<C> {
    pub fn new(client: C, max_iterations: usize) -> Self {
        Self {
            client,
            max_iterations: max_iterations.max(1),
        }
    }
}

impl<C: ChatClient> TaskRunner for AgentExecutor<C> {
    fn execute(&self, agent: &Agent, task: &Task, context: Option<&str>) -> Result<String> {
        let tools: Vec<ToolDefinition> = agent.tools.iter().map(|t| t.definition()).collect();
        let mut messages = vec![
            ChatMessage::system(agent.system_prompt()),
            ChatMessage::user(task.prompt(context)),
        ];

        for iteration in 1..=self.max_iterations {
            log::debug!("Agent '{}' iteration {}", agent.role, iteration);

            let reply = self
                .client
                .complete(&messages, &tools)
                .context(format!("Agent '{}' failed to get a model response", agent.role))?;

            if !reply.has_tool_calls() {
                return reply
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| eyre::eyre!("Agent '{}' returned an empty answer", agent.role));
            }

            messages.push(ChatMessage::assistant(reply.content.clone(), reply.tool_calls.clone()));

            for call in &reply.tool_calls {
                // Tool failures go back to the model, they do not end the task
                let output = match agent.tool(&call.name) {
                    Some(tool) => tool.invoke(&call.arguments).unwrap_or_else(|e| {
                        log::warn!("Tool {} failed: {:#}", call.name, e);
                        format!("Error: {:#}", e)
                    }),
                    None => {
                        log::warn!("Agent '{}' asked for unknown tool {}", agent.role, call.name);
                        format!("Error: unknown tool '{}'", call.name)
                    }
                };
                messages.push(ChatMessage::tool_result(&call.id, output));
            }
        }

        eyre::bail!(
            "Agent '{}' did not finish within {} iterations",
            agent.role,
            self.max_iterations
        )
    }
}
