use crate::types::category::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal state of one category's pagination chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CategoryOutcome {
    Completed { pages: u32 },
    ZeroResults,
    Failed(String),
}

impl fmt::Display for CategoryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryOutcome::Completed { pages } => write!(f, "completed after {} page(s)", pages),
            CategoryOutcome::ZeroResults => f.write_str("no results"),
            CategoryOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub outcome: CategoryOutcome,
    /// Venues the category contributed before deduplication.
    pub venue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatorStatus {
    /// Id of the most recently started run, 0 before the first one.
    pub latest_run_id: u64,
    pub in_flight: bool,
    /// Categories of the in-flight run that have not reached a terminal state.
    pub pending_categories: usize,
    pub last_published_run: Option<u64>,
    pub last_report: Vec<CategoryReport>,
}
