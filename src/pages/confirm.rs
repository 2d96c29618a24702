//! Confirmation prompts.

use mockall::automock;

/// Blocking yes/no question put to the user before a destructive action.
#[automock]
pub trait Confirm {
    /// Ask `message`; `true` means go ahead.
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes to everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
