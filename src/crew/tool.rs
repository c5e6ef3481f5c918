//! File tools the agents may call

use eyre::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::llm::ToolDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    /// Reads one fixed file; the model cannot pick another path
    FileRead { path: PathBuf },
    /// Writes files below `root`
    FileWrite { root: PathBuf },
}

#[derive(Debug, Deserialize)]
struct WriteArgs {
    filename: String,
    content: String,
    #[serde(default = "default_overwrite")]
    overwrite: bool,
}

fn default_overwrite() -> bool {
    true
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::FileRead { .. } => "read_file",
            Tool::FileWrite { .. } => "write_file",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Tool::FileRead { path } => format!(
                "Read the full contents of the file {}. Takes no arguments.",
                path.display()
            ),
            Tool::FileWrite { .. } => "Write text content to a file in the output directory. \
                 Arguments: filename (relative path), content (text to write), \
                 overwrite (replace an existing file, default true)."
                .to_string(),
        }
    }

    pub fn parameters(&self) -> serde_json::Value {
        match self {
            Tool::FileRead { .. } => json!({
                "type": "object",
                "properties": {},
            }),
            Tool::FileWrite { .. } => json!({
                "type": "object",
                "properties": {
                    "filename": { "type": "string", "description": "Relative file name, e.g. reply.md" },
                    "content": { "type": "string", "description": "Text to write" },
                    "overwrite": { "type": "boolean", "description": "Replace the file if it exists" },
                },
                "required": ["filename", "content"],
            }),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description(),
            parameters: self.parameters(),
        }
    }

    /// Run the tool with the model-supplied JSON argument string
    pub fn invoke(&self, arguments: &str) -> Result<String> {
        match self {
            Tool::FileRead { path } => {
                log::info!("Tool read_file: {}", path.display());
                fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
            }
            Tool::FileWrite { root } => {
                let args: WriteArgs = serde_json::from_str(arguments).context("Invalid write_file arguments")?;
                let target = resolve_target(root, &args.filename)?;

                if target.exists() && !args.overwrite {
                    eyre::bail!("File {} already exists and overwrite is false", target.display());
                }
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).context("Failed to create output directory")?;
                }

                log::info!("Tool write_file: {} ({} bytes)", target.display(), args.content.len());
                fs::write(&target, &args.content).context(format!("Failed to write {}", target.display()))?;
                Ok(format!("Content successfully written to {}", target.display()))
            }
        }
    }
}

/// Join `filename` onto `root`, refusing anything that would escape it
fn resolve_target(root: &Path, filename: &str) -> Result<PathBuf> {
    let relative = Path::new(filename.trim());
    if relative.as_os_str().is_empty() {
        eyre::bail!("Filename must not be empty");
    }
    if relative.is_absolute() {
        eyre::bail!("Filename must be relative: {}", filename);
    }
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_) | Component::RootDir))
    {
        eyre::bail!("Filename must stay inside the output directory: {}", filename);
    }
    Ok(root.join(relative))
}
