//! # Confirmation Seam
//!
//! Destructive operations (single delete, bulk delete) only take effect after
//! the user confirms. The UI supplies the prompt mechanism; a closure works:
//!
//! ```rust
//! use curio_core::confirm::{Confirm, DeletePrompt};
//!
//! let mut always_yes = |_: &str| true;
//! assert!(always_yes.confirm(&DeletePrompt::Single.message()));
//! ```

/// Asks the user to confirm a destructive operation.
pub trait Confirm {
    /// Returns `true` to proceed, `false` to abort with no changes.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What is about to be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePrompt {
    Single,
    Many(usize),
}

impl DeletePrompt {
    pub fn message(&self) -> String {
        match self {
            DeletePrompt::Single => "Are you sure you want to delete this item?".to_string(),
            DeletePrompt::Many(count) => {
                format!("Are you sure you want to delete {} item(s)?", count)
            }
        }
    }
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Confirmed; this many items were removed (0 if none matched).
    Deleted(usize),
    /// The user said no. Nothing changed.
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_messages() {
        assert_eq!(
            DeletePrompt::Many(3).message(),
            "Are you sure you want to delete 3 item(s)?"
        );
    }

    #[test]
    fn test_closure_sees_prompt() {
        let mut seen = Vec::new();
        let mut confirm = |prompt: &str| {
            seen.push(prompt.to_string());
            false
        };
        assert!(!confirm.confirm("delete?"));
        assert_eq!(seen, vec!["delete?".to_string()]);
    }
}
