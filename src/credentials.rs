//! API keys resolved once at startup
//!
//! Keys come from the environment first, then from a `.env` file in the config
//! directory. Missing keys only produce warnings; the model call fails later if
//! the key was actually needed.

use std::fs;
use std::path::Path;

use crate::config::Config;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const SERPER_API_KEY: &str = "SERPER_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    /// Only used for web search, which the current agents do not have
    pub serper_api_key: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment and `<config dir>/.env`
    pub fn load() -> Self {
        let env_file = Config::config_dir().join(".env");
        Self::from_sources(|key| std::env::var(key).ok(), &env_file)
    }

    fn from_sources<F>(lookup: F, env_file: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| read_env_file(env_file, key))
        };

        Self {
            openai_api_key: resolve(OPENAI_API_KEY),
            serper_api_key: resolve(SERPER_API_KEY),
        }
    }

    /// One message per missing key
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.openai_api_key.is_none() {
            warnings.push(format!(
                "{} not found in environment. Set {} before running for real runs.",
                OPENAI_API_KEY, OPENAI_API_KEY
            ));
        }
        if self.serper_api_key.is_none() {
            warnings.push(format!(
                "{} not found in environment. Web search may be disabled or limited.",
                SERPER_API_KEY
            ));
        }
        warnings
    }
}

fn read_env_file(path: &Path, key: &str) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((k, value)) = line.split_once('=')
            && k.trim() == key
        {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_keys_from_environment() {
        let temp = TempDir::new().unwrap();
        let creds = Credentials::from_sources(
            lookup_from(&[(OPENAI_API_KEY, "sk-test"), (SERPER_API_KEY, "serp")]),
            &temp.path().join(".env"),
        );
        assert_eq!(creds.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(creds.serper_api_key.as_deref(), Some("serp"));
        assert!(creds.warnings().is_empty());
    }

    #[test]
    fn test_missing_keys_warn() {
        let temp = TempDir::new().unwrap();
        let creds = Credentials::from_sources(lookup_from(&[]), &temp.path().join(".env"));
        let warnings = creds.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains(OPENAI_API_KEY));
        assert!(warnings[1].contains(SERPER_API_KEY));
    }

    #[test]
    fn test_blank_env_value_is_missing() {
        let temp = TempDir::new().unwrap();
        let creds = Credentials::from_sources(lookup_from(&[(OPENAI_API_KEY, "  ")]), &temp.path().join(".env"));
        assert!(creds.openai_api_key.is_none());
    }

    #[test]
    fn test_env_file_fallback() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join(".env");
        fs::write(
            &env_file,
            "# keys\nexport OPENAI_API_KEY=\"sk-from-file\"\nSERPER_API_KEY=\n",
        )
        .unwrap();

        let creds = Credentials::from_sources(lookup_from(&[]), &env_file);
        assert_eq!(creds.openai_api_key.as_deref(), Some("sk-from-file"));
        assert!(creds.serper_api_key.is_none());
        assert_eq!(creds.warnings().len(), 1);
    }

    #[test]
    fn test_environment_wins_over_env_file() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join(".env");
        fs::write(&env_file, "OPENAI_API_KEY=sk-from-file\n").unwrap();

        let creds = Credentials::from_sources(lookup_from(&[(OPENAI_API_KEY, "sk-env")]), &env_file);
        assert_eq!(creds.openai_api_key.as_deref(), Some("sk-env"));
    }
}
