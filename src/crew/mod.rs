//! Agents, tasks and the sequential process that runs them
//!
//! A crew is a fixed list of agents and the tasks assigned to them. Tasks run
//! strictly in order; later tasks only see earlier results as text context.

pub mod agent;
pub mod process;
pub mod runner;
pub mod task;
pub mod tool;

pub use agent::Agent;
pub use process::Crew;
pub use runner::{AgentExecutor, TaskRunner};
pub use task::{DRAFT_PLACEHOLDER, response_task, writing_task};
