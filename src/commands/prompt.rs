//! Interactive prompts

use crate::error::{NanopostError, Result};
use inquire::{InquireError, Select, Text};

/// Source of interactive answers. `None` means the user skipped the prompt.
pub trait Prompter {
    /// Pick one of `options`; returns its index.
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<Option<usize>>;

    fn text(&mut self, message: &str, initial: &str) -> Result<Option<String>>;
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

fn prompt_error(e: InquireError) -> NanopostError {
    NanopostError::prompt(e.to_string())
}

/// Escape and Ctrl-C count as skipping the prompt.
fn skippable<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(prompt_error(e)),
    }
}

impl Prompter for InquirePrompter {
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<Option<usize>> {
        let answer = Select::new(message, options.to_vec())
            .with_starting_cursor(default)
            .raw_prompt();
        Ok(skippable(answer)?.map(|choice| choice.index))
    }

    fn text(&mut self, message: &str, initial: &str) -> Result<Option<String>> {
        skippable(Text::new(message).with_initial_value(initial).prompt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_and_interrupt_are_skips() {
        assert_eq!(skippable::<usize>(Err(InquireError::OperationCanceled)).unwrap(), None);
        assert_eq!(skippable::<usize>(Err(InquireError::OperationInterrupted)).unwrap(), None);
        assert_eq!(skippable(Ok(2)).unwrap(), Some(2));
    }

    #[test]
    fn test_other_prompt_failures_are_errors() {
        let err = skippable::<usize>(Err(InquireError::NotTTY)).unwrap_err();
        assert!(matches!(err, NanopostError::Prompt { .. }));
    }
}
