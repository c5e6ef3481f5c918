//! Diagnose twincrew setup issues

use colored::*;
use eyre::Result;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::credentials::{Credentials, OPENAI_API_KEY, SERPER_API_KEY};

pub fn run(config: &Config, credentials: &Credentials) -> Result<()> {
    println!("{}", "twincrew Doctor".bold());
    println!("{}", "═".repeat(50));
    println!();

    let mut issues = 0;

    // Config source
    match &config.source {
        Some(path) => println!("{} Config file: {}", "✓".green(), path.display()),
        None => println!("{} No config file found, using defaults", "⚠".yellow()),
    }

    // Background document
    let background = Config::expand_path(&config.paths.background);
    if background.is_file() {
        let size = fs::metadata(&background).map(|m| m.len()).unwrap_or(0);
        println!("{} Background document: {} ({} bytes)", "✓".green(), background.display(), size);
    } else {
        println!("{} Background document missing: {}", "✗".red(), background.display());
        println!("  The twin agent reads this file to answer questions");
        issues += 1;
    }

    // Output directory
    let output_dir = Config::expand_path(&config.paths.output_dir);
    if is_writable_dir(&output_dir) {
        println!("{} Output directory: {}", "✓".green(), output_dir.display());
    } else {
        println!("{} Output directory not writable: {}", "✗".red(), output_dir.display());
        issues += 1;
    }

    println!();

    // API keys
    println!("{}", "API keys:".bold());
    if credentials.openai_api_key.is_some() {
        println!("  {} {}", "✓".green(), OPENAI_API_KEY);
    } else {
        println!("  {} {} (required for model calls)", "✗".red(), OPENAI_API_KEY);
        issues += 1;
    }
    if credentials.serper_api_key.is_some() {
        println!("  {} {}", "✓".green(), SERPER_API_KEY);
    } else {
        println!("  {} {} (optional, web search)", "⚠".yellow(), SERPER_API_KEY);
    }

    println!();

    // Model endpoint
    println!("{}", "Model:".bold());
    println!("  Endpoint: {}", config.llm.base_url.cyan());
    println!("  Model:    {}", config.llm.model.cyan());
    println!("  Timeout:  {}s", config.llm.timeout_secs);

    println!();

    // Summary
    println!("{}", "═".repeat(50));
    if issues == 0 {
        println!("{} All checks passed!", "✓".green().bold());
    } else {
        println!("{} {} issue(s) found", "⚠".yellow().bold(), issues);
    }

    Ok(())
}

/// Creates (and drops) an anonymous temp file in `dir`
fn is_writable_dir(dir: &Path) -> bool {
    dir.is_dir() && tempfile::tempfile_in(dir).is_ok()
}
