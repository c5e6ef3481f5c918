//! The two agent roles

use std::path::Path;

use super::tool::Tool;

/// A named role with a goal, a backstory and the tools it may call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Tool>,
    pub allow_delegation: bool,
}

impl Agent {
    /// Persona responder: answers as Johnson, reading the background document
    pub fn twin(background: &Path) -> Self {
        Self {
            role: "The little me of myself".to_string(),
            goal: "Provide short paragraph about the question asked on Johnson behalf given his information"
                .to_string(),
            backstory: "You are Johnson Wang, a student currently studying at Harvard, \
                        who excels in academics and is passionate about AI."
                .to_string(),
            tools: vec![Tool::FileRead {
                path: background.to_path_buf(),
            }],
            allow_delegation: false,
        }
    }

    /// Formal rewriter: polishes a draft and saves it into `output_dir`
    pub fn writer(output_dir: &Path) -> Self {
        Self {
            role: "Formal Response Writer".to_string(),
            goal: "Take a draft first-person response and produce a concise, formal, \
                   and polished reply suitable for sending"
                .to_string(),
            backstory: "You are a professional writer who converts short, candid draft replies into \
                        formal, concise messages in first-person voice. Expect input that contains a short \
                        'answer' and 'support' section. Produce a final first-person message (2-4 sentences) \
                        and optionally a short formal paragraph of context if requested."
                .to_string(),
            tools: vec![Tool::FileWrite {
                root: output_dir.to_path_buf(),
            }],
            allow_delegation: false,
        }
    }

    /// System message for this agent
    pub fn system_prompt(&self) -> String {
        let mut parts = vec![
            format!("You are {}. {}", self.role, self.backstory),
            format!("Your personal goal is: {}", self.goal),
        ];

        if !self.tools.is_empty() {
            let names: Vec<&str> = self.tools.iter().map(Tool::name).collect();
            parts.push(format!("You can use these tools: {}", names.join(", ")));
        }

        parts.join("\n\n")
    }

    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_twin_reads_background() {
        let agent = Agent::twin(Path::new("./information.txt"));
        assert_eq!(
            agent.tools,
            vec![Tool::FileRead {
                path: PathBuf::from("./information.txt")
            }]
        );
        assert!(!agent.allow_delegation);
        assert!(agent.tool("read_file").is_some());
        assert!(agent.tool("write_file").is_none());
    }

    #[test]
    fn test_writer_writes_output() {
        let agent = Agent::writer(Path::new("/tmp/out"));
        assert_eq!(agent.role, "Formal Response Writer");
        assert!(agent.tool("write_file").is_some());
    }

    #[test]
    fn test_system_prompt() {
        let prompt = Agent::twin(Path::new("info.txt")).system_prompt();
        assert!(prompt.starts_with("You are The little me of myself."));
        assert!(prompt.contains("Johnson Wang"));
        assert!(prompt.contains("Your personal goal is:"));
        assert!(prompt.contains("read_file"));
    }
}
