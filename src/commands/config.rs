use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "twincrew Configuration".bold());
            if let Some(source) = &config.source {
                println!("{}", format!("from {}", source.display()).dimmed());
            }
            println!();

            println!("log_level: {}", config.log_level.as_filter());
            println!();

            println!("{}:", "llm".cyan());
            println!("  base_url: {}", config.llm.base_url);
            println!("  model: {}", config.llm.model);
            println!("  temperature: {}", config.llm.temperature);
            println!("  timeout_secs: {}", config.llm.timeout_secs);
            println!("  max_iterations: {}", config.llm.max_iterations);
            println!();

            println!("{}:", "paths".cyan());
            println!("  background: {}", config.paths.background.display());
            println!("  output_dir: {}", config.paths.output_dir.display());
            println!("  reply_file: {}", config.paths.reply_file);
            println!("  fallback_files: {}", config.paths.fallback_files.join(", "));
        }
    }

    Ok(())
}

fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config) {
        Some(v) => println!("{}", v),
        None => eyre::bail!("Unknown config key: {}", key),
    }
    Ok(())
}

fn lookup(key: &str, config: &Config) -> Option<String> {
    let value = match key {
        "log_level" | "log-level" => config.log_level.as_filter().to_string(),
        "llm.base_url" => config.llm.base_url.clone(),
        "llm.model" => config.llm.model.clone(),
        "llm.temperature" => config.llm.temperature.to_string(),
        "llm.timeout_secs" => config.llm.timeout_secs.to_string(),
        "llm.max_iterations" => config.llm.max_iterations.to_string(),
        "paths.background" => config.paths.background.display().to_string(),
        "paths.output_dir" => config.paths.output_dir.display().to_string(),
        "paths.reply_file" => config.paths.reply_file.clone(),
        "paths.fallback_files" => config.paths.fallback_files.join(","),
        _ => return None,
    };
    Some(value)
}
