//! Ask a question and run the twin and writer agents in sequence

use colored::*;
use eyre::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::crew::{Agent, AgentExecutor, Crew, DRAFT_PLACEHOLDER, TaskRunner, response_task, writing_task};
use crate::llm::OpenAiClient;
use crate::question::{Question, read_question, resolve_question};
use crate::report::{OutputReport, inspect_outputs};

pub struct AskOptions {
    pub question: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub quiet: bool,
}

pub fn run(opts: AskOptions, config: &Config, credentials: &Credentials) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    for warning in credentials.warnings() {
        log::warn!("{}", warning);
        writeln!(out, "{}  {}", "⚠".yellow(), warning)?;
    }

    if !opts.quiet {
        writeln!(
            out,
            "{}",
            "🚀 Welcome to Chat use Johnson - a master student at Harvard studying AI and biology".bold()
        )?;
        writeln!(out, "{}", "=".repeat(50))?;
    }

    let question = match opts.question {
        Some(raw) => resolve_question(&raw),
        None => read_question(&mut input, &mut out)?,
    };
    if question.defaulted {
        writeln!(out, "Using default question: {}", question.text)?;
    }
    log::info!("Question: {:?} (defaulted: {})", question.text, question.defaulted);

    writeln!(out, "\n📚 Question: {}", question.text)?;
    writeln!(out, "{}", "=".repeat(50))?;

    writeln!(out, "\n🤖 Creating AI agents...")?;
    writeln!(out, "📋 Setting up tasks...")?;
    let crew = build_crew(&question, config)?;
    writeln!(out, "👥 Assembling the crew ({} agents)...", crew.agents().len())?;

    if opts.dry_run {
        return print_plan(&crew, &mut out);
    }

    let client = OpenAiClient::new(&config.llm, credentials.openai_api_key.clone());
    log::info!("Using chat endpoint {} with model {}", client.endpoint(), config.llm.model);
    let executor = AgentExecutor::new(client, config.llm.max_iterations);
    let output_dir = Config::expand_path(&config.paths.output_dir);

    execute_guarded(
        &crew,
        &executor,
        &output_dir,
        &config.paths.output_candidates(),
        opts.verbose,
        &mut out,
    )
}

/// Twin answers the question, writer rewrites the placeholder draft
pub fn build_crew(question: &Question, config: &Config) -> Result<Crew> {
    let background = Config::expand_path(&config.paths.background);
    let output_dir = Config::expand_path(&config.paths.output_dir);

    let twin = Agent::twin(&background);
    let writer = Agent::writer(&output_dir);

    let response = response_task(&twin, &question.text);
    // NOTE: the writer receives the placeholder, not the twin's draft; likely a defect.
    let writing = writing_task(&writer, DRAFT_PLACEHOLDER, &config.paths.reply_file);

    Crew::new(vec![twin, writer], vec![response, writing]).context("Failed to assemble crew")
}

fn print_plan<W: Write>(crew: &Crew, out: &mut W) -> Result<()> {
    writeln!(out, "\n{}", "Dry run, no model calls made.".dimmed())?;
    for (index, task) in crew.tasks().iter().enumerate() {
        writeln!(out, "\n{} Task {} ({})", "→".blue(), index + 1, task.agent_role.cyan())?;
        writeln!(out, "{}", task.description)?;
        writeln!(out, "Expected output: {}", task.expected_output)?;
    }
    Ok(())
}

/// Run the crew and report; any failure is printed, never returned
pub fn execute_guarded<W: Write>(
    crew: &Crew,
    runner: &dyn TaskRunner,
    output_dir: &Path,
    candidates: &[String],
    verbose: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "\n🎯 Starting crew execution...")?;
    writeln!(out, "{}", "=".repeat(50))?;

    if let Err(e) = kickoff_and_report(crew, runner, output_dir, candidates, verbose, out) {
        log::error!("Crew execution failed: {:#}", e);
        writeln!(out, "\n{} An error occurred: {:#}", "❌".red(), e)?;
        writeln!(out, "\n💡 Note: This example requires valid API keys to function properly.")?;
        writeln!(out, "Please set your OPENAI_API_KEY environment variable.")?;
    }

    Ok(())
}

fn kickoff_and_report<W: Write>(
    crew: &Crew,
    runner: &dyn TaskRunner,
    output_dir: &Path,
    candidates: &[String],
    verbose: bool,
    out: &mut W,
) -> Result<()> {
    let result = crew.kickoff(runner)?;

    if verbose {
        for task in &result.tasks {
            writeln!(
                out,
                "\n{} [{}] {}",
                "→".blue(),
                task.completed_at.format("%H:%M:%S"),
                task.agent_role.cyan()
            )?;
            writeln!(out, "{}", task.raw)?;
        }
    }

    writeln!(out, "\n{} Crew execution completed!", "✅".green())?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "📄 Final Result:")?;
    writeln!(out, "{}", result)?;

    match inspect_outputs(output_dir, candidates)? {
        OutputReport::Found { path, kind, length } => {
            writeln!(out, "\n📝 {} successfully saved to '{}'", kind, path.display())?;
            writeln!(out, "📊 {} length: {} bytes", kind, length)?;
        }
        OutputReport::Missing => {
            writeln!(
                out,
                "\n{}  No output file found. The agents may not have used the file tools.",
                "⚠".yellow()
            )?;
        }
    }

    Ok(())
}
