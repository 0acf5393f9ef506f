use crate::shared::Result;

/// UserPrompt port for interactive questions (product menus)
pub trait UserPrompt {
    /// Shows `prompt` and returns the operator's answer without the trailing newline
    fn ask(&self, prompt: &str) -> Result<String>;
}
