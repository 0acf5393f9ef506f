use macos_fetch::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock UserPrompt returning a canned answer and recording the questions
#[derive(Clone)]
pub struct MockPrompt {
    answer: String,
    pub questions: Arc<Mutex<Vec<String>>>,
}

impl MockPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            questions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl UserPrompt for MockPrompt {
    fn ask(&self, prompt: &str) -> Result<String> {
        self.questions.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}
