//! Post-run check for the file the writer was asked to produce

use eyre::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Reply,
    Article,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Reply => write!(f, "Reply"),
            OutputKind::Article => write!(f, "Article"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputReport {
    Found {
        path: PathBuf,
        kind: OutputKind,
        /// Byte length of the file's contents
        length: usize,
    },
    Missing,
}

/// Check `candidates` in order below `dir`; the first one that exists wins.
///
/// The first candidate is the reply, the rest are articles. Absence is not an
/// error.
pub fn inspect_outputs(dir: &Path, candidates: &[String]) -> Result<OutputReport> {
    for (index, name) in candidates.iter().enumerate() {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }

        let content = fs::read(&path).context(format!("Failed to read {}", path.display()))?;
        let kind = if index == 0 { OutputKind::Reply } else { OutputKind::Article };
        log::info!("Found {} output at {} ({} bytes)", kind, path.display(), content.len());

        return Ok(OutputReport::Found {
            path,
            kind,
            length: content.len(),
        });
    }

    log::warn!("None of {:?} found in {}", candidates, dir.display());
    Ok(OutputReport::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn candidates() -> Vec<String> {
        vec!["johnson_reply.md".to_string(), "ai_studio_article.md".to_string()]
    }

    #[test]
    fn test_missing_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let report = inspect_outputs(temp.path(), &candidates()).unwrap();
        assert_eq!(report, OutputReport::Missing);
    }

    #[test]
    fn test_reply_length_is_byte_length() {
        let temp = TempDir::new().unwrap();
        let content = "Dear Professor, I study AI — and biology.\n";
        fs::write(temp.path().join("johnson_reply.md"), content).unwrap();

        let report = inspect_outputs(temp.path(), &candidates()).unwrap();
        assert_eq!(
            report,
            OutputReport::Found {
                path: temp.path().join("johnson_reply.md"),
                kind: OutputKind::Reply,
                length: content.len(),
            }
        );
    }

    #[test]
    fn test_reply_preferred_over_article() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ai_studio_article.md"), "article").unwrap();
        fs::write(temp.path().join("johnson_reply.md"), "reply").unwrap();

        match inspect_outputs(temp.path(), &candidates()).unwrap() {
            OutputReport::Found { kind, length, .. } => {
                assert_eq!(kind, OutputKind::Reply);
                assert_eq!(length, 5);
            }
            OutputReport::Missing => panic!("expected a reply"),
        }
    }

    #[test]
    fn test_article_fallback() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ai_studio_article.md"), "").unwrap();

        match inspect_outputs(temp.path(), &candidates()).unwrap() {
            OutputReport::Found { kind, length, .. } => {
                assert_eq!(kind, OutputKind::Article);
                assert_eq!(length, 0);
            }
            OutputReport::Missing => panic!("expected an article"),
        }
    }

    #[test]
    fn test_directory_with_candidate_name_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("johnson_reply.md")).unwrap();
        let report = inspect_outputs(temp.path(), &candidates()).unwrap();
        assert_eq!(report, OutputReport::Missing);
    }
}
