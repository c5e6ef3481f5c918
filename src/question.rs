//! Reading the user's question

use eyre::{Context, Result};
use std::io::{BufRead, Write};

pub const DEFAULT_QUESTION: &str = "Explain my background in 3 sentences";
pub const PROMPT: &str = "Enter a question you'd like Johnson to answer: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// True when the input was blank and the default was substituted
    pub defaulted: bool,
}

/// Blank input becomes the default question; anything else is kept verbatim.
pub fn resolve_question(raw: &str) -> Question {
    if raw.trim().is_empty() {
        Question {
            text: DEFAULT_QUESTION.to_string(),
            defaulted: true,
        }
    } else {
        Question {
            text: raw.to_string(),
            defaulted: false,
        }
    }
}

/// Prompt on `output` and read a single line from `input`
pub fn read_question<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Question> {
    write!(output, "{}", PROMPT).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read question")?;
    let line = line.trim_end_matches(['\n', '\r']);

    log::debug!("Read question: {:?}", line);
    Ok(resolve_question(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_uses_default() {
        let question = resolve_question("   ");
        assert_eq!(question.text, "Explain my background in 3 sentences");
        assert!(question.defaulted);
    }

    #[test]
    fn test_empty_uses_default() {
        assert!(resolve_question("").defaulted);
        assert!(resolve_question("\t\n").defaulted);
    }

    #[test]
    fn test_question_passes_through() {
        let question = resolve_question("What is your major?");
        assert_eq!(question.text, "What is your major?");
        assert!(!question.defaulted);
    }

    #[test]
    fn test_surrounding_whitespace_kept() {
        let question = resolve_question("  Why AI?  ");
        assert_eq!(question.text, "  Why AI?  ");
    }

    #[test]
    fn test_read_question_prompts_and_strips_newline() {
        let mut input = Cursor::new("What is your major?\r\n");
        let mut output = Vec::new();
        let question = read_question(&mut input, &mut output).unwrap();
        assert_eq!(question.text, "What is your major?");
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }

    #[test]
    fn test_read_question_eof_uses_default() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let question = read_question(&mut input, &mut output).unwrap();
        assert!(question.defaulted);
    }
}
