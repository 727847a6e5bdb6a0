// file: src/retrieval/router.rs
// description: routing between summarize-all and targeted question modes

pub const SUMMARY_TRIGGERS: [&str; 3] = ["summarize", "summary", "summaries"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    SummarizeAll,
    TargetedQuestion,
}

/// Any summary trigger anywhere in the query wins over relevance lookup.
pub fn classify(query: &str) -> QueryKind {
    let lowered = query.to_lowercase();

    if SUMMARY_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
    {
        QueryKind::SummarizeAll
    } else {
        QueryKind::TargetedQuestion
    }
}
