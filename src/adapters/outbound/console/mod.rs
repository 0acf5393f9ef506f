/// Console adapters for operator-facing output and input
mod progress_reporter;
mod prompt;

pub use progress_reporter::StderrProgressReporter;
pub use prompt::StdinPrompt;
