//! Sequential execution of a crew's tasks

use chrono::{DateTime, Local};
use eyre::{Context, Result};
use std::fmt;

use super::agent::Agent;
use super::runner::TaskRunner;
use super::task::Task;

/// Agents plus the tasks they run, in order
#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub agent_role: String,
    pub raw: String,
    pub completed_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub tasks: Vec<TaskOutput>,
    /// Output of the last task
    pub raw: String,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Crew {
    /// Every task must name an agent that is part of the crew
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Result<Self> {
        if tasks.is_empty() {
            eyre::bail!("A crew needs at least one task");
        }
        for task in &tasks {
            if !agents.iter().any(|a| a.role == task.agent_role) {
                eyre::bail!("Task is assigned to unknown agent '{}'", task.agent_role);
            }
        }
        Ok(Self { agents, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Run tasks one after another. Each task sees the earlier outputs as
    /// context; the first failure stops the run.
    pub fn kickoff(&self, runner: &dyn TaskRunner) -> Result<CrewOutput> {
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = self
                .agents
                .iter()
                .find(|a| a.role == task.agent_role)
                .ok_or_else(|| eyre::eyre!("No agent for role '{}'", task.agent_role))?;

            let context = (!outputs.is_empty()).then(|| {
                outputs
                    .iter()
                    .map(|o| o.raw.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            });

            log::info!("Starting task {}/{} with agent '{}'", index + 1, self.tasks.len(), agent.role);
            let raw = runner
                .execute(agent, task, context.as_deref())
                .context(format!("Task {} ({}) failed", index + 1, agent.role))?;
            log::info!("Task {} finished ({} bytes)", index + 1, raw.len());

            outputs.push(TaskOutput {
                agent_role: agent.role.clone(),
                raw,
                completed_at: Local::now(),
            });
        }

        let raw = outputs.last().map(|o| o.raw.clone()).unwrap_or_default();
        Ok(CrewOutput { tasks: outputs, raw })
    }
}
