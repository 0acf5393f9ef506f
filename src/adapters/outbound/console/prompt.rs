use crate::ports::outbound::UserPrompt;
use crate::shared::Result;
use anyhow::Context;
use std::io::{self, BufRead, Write};

/// StdinPrompt adapter: asks on stderr, reads one line from stdin
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPrompt for StdinPrompt {
    fn ask(&self, prompt: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}", prompt).context("Failed to write prompt")?;
        stderr.flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read answer from stdin")?;
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}
