// file: src/pipeline/composer.rs
// description: prompt construction and generation dispatch for answers and summaries
// reference: catch-per-unit error handling

use crate::llm::Generator;
use crate::models::{Answer, SummarySection};
use crate::retrieval::find_most_relevant;
use crate::store::Documents;
use tracing::{info, warn};

pub fn answer_prompt(text: &str, query: &str) -> String {
    format!("Here is the content of the file: {}. Now, {}", text, query)
}

pub fn summary_prompt(text: &str) -> String {
    format!("Summarize the following content: {}", text)
}

pub struct Composer<'a> {
    generator: &'a dyn Generator,
}

impl<'a> Composer<'a> {
    pub fn new(generator: &'a dyn Generator) -> Self {
        Self { generator }
    }

    /// Answers `query` from the single most relevant document.
    pub async fn answer(&self, query: &str, documents: &Documents) -> Answer {
        let Some(id) = find_most_relevant(query, documents) else {
            info!("No relevant document for query");
            return Answer::NoMatch;
        };

        let Some(document) = documents.get(&id) else {
            return Answer::NoMatch;
        };

        info!("Answering from {}", id);
        match self
            .generator
            .generate(&answer_prompt(&document.text, query))
            .await
        {
            Ok(text) => Answer::Generated { document: id, text },
            Err(e) => {
                warn!("Answer generation failed for {}: {}", id, e);
                Answer::Failed {
                    document: id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// One generation call per document, in store order; a failure only replaces that section.
    pub async fn summarize_all(&self, documents: &Documents) -> Vec<SummarySection> {
        let mut sections = Vec::with_capacity(documents.len());

        for (id, document) in documents {
            info!("Summarizing {}", id);
            let section = match self.generator.generate(&summary_prompt(&document.text)).await {
                Ok(text) => SummarySection::Summary {
                    document: id.clone(),
                    text,
                },
                Err(e) => {
                    warn!("Summary generation failed for {}: {}", id, e);
                    SummarySection::Failed {
                        document: id.clone(),
                        error: e.to_string(),
                    }
                }
            };
            sections.push(section);
        }

        sections
    }
}
