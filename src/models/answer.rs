// file: src/models/answer.rs
// description: outcomes produced by the answer and summary composer
// reference: internal data structures

use std::fmt;

pub const NO_RELEVANT_FILE: &str = "No relevant file found.";

/// Result of a targeted question. Every variant renders as user-facing text.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    NoMatch,
    Generated { document: String, text: String },
    Failed { document: String, error: String },
}

impl Answer {
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::NoMatch => None,
            Self::Generated { document, .. } | Self::Failed { document, .. } => {
                Some(document.as_str())
            }
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => write!(f, "{}", NO_RELEVANT_FILE),
            Self::Generated { text, .. } => write!(f, "{}", text),
            Self::Failed { error, .. } => write!(f, "Error: {}", error),
        }
    }
}

/// One labeled section of a summarize-all response.
#[derive(Debug, Clone, PartialEq)]
pub enum SummarySection {
    Summary { document: String, text: String },
    Failed { document: String, error: String },
}

impl SummarySection {
    pub fn document(&self) -> &str {
        match self {
            Self::Summary { document, .. } | Self::Failed { document, .. } => document.as_str(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for SummarySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary { document, text } => {
                write!(f, "**Summary of {}:**\n\n{}", document, text)
            }
            Self::Failed { document, error } => {
                write!(f, "Error summarizing {}: {}", document, error)
            }
        }
    }
}

/// Sections in store order, separated by a blank line. No sections renders as "".
pub fn render_summaries(sections: &[SummarySection]) -> String {
    sections
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// What a query evaluated to, depending on how it was routed.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Answer(Answer),
    Summaries(Vec<SummarySection>),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer(answer) => write!(f, "{}", answer),
            Self::Summaries(sections) => write!(f, "{}", render_summaries(sections)),
        }
    }
}
