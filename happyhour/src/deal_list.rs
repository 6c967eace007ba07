use common::types::deal::{Deal, filter_deals, sample_deals};

pub const NO_MATCHES: &str = "No deals match your search.";

/// The side list of happy-hour deals, filtered by the search box.
#[derive(Debug, Clone)]
pub struct DealListPanel {
    deals: Vec<Deal>,
    query: String,
}

impl DealListPanel {
    pub fn new(deals: Vec<Deal>) -> Self {
        DealListPanel {
            deals,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<&Deal> {
        filter_deals(&self.deals, &self.query)
    }

    pub fn render(&self) -> Vec<String> {
        let visible = self.visible();
        let mut lines = vec!["DEALS NEAR YOU".to_string()];
        if visible.is_empty() {
            lines.push(format!("  {}", NO_MATCHES));
            return lines;
        }
        for deal in visible {
            lines.push(format!(
                "  {}  ★ {}  {}",
                deal.bar, deal.rating, deal.distance
            ));
            lines.push(format!("    {} ({})", deal.deal, deal.hours));
            lines.push(format!("    [{}]", deal.tags.join("] [")));
        }
        lines
    }
}

impl Default for DealListPanel {
    fn default() -> Self {
        Self::new(sample_deals())
    }
}
