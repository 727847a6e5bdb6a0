// file: src/llm/mod.rs
// description: text generation seam consumed by the composer
// reference: internal module structure

pub mod groq;

pub use groq::GroqChatClient;

use crate::error::Result;
use async_trait::async_trait;

/// Produces text for a prompt. Failures are returned, never panicked.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Generator;
    use crate::error::{QaError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies "reply #n" and fails for prompts containing `fail_marker`.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        fail_marker: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(marker: &str) -> Self {
            Self {
                fail_marker: Some(marker.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());

            match &self.fail_marker {
                Some(marker) if prompt.contains(marker.as_str()) => {
                    Err(QaError::Generation("upstream unavailable".to_string()))
                }
                _ => Ok(format!("reply #{}", prompts.len())),
            }
        }
    }
}
