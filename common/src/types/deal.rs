use serde::{Deserialize, Serialize};

/// A happy-hour deal shown in the side list.
///
/// Deals are sample data and are not linked to any map venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: u32,
    pub bar: String,
    pub deal: String,
    pub hours: String,
    pub rating: f32,
    pub distance: String,
    pub tags: Vec<String>,
}

impl Deal {
    /// Case-insensitive substring match against the bar name or the deal text.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.bar.to_lowercase().contains(&query) || self.deal.to_lowercase().contains(&query)
    }
}

pub fn sample_deals() -> Vec<Deal> {
    vec![
        Deal {
            id: 1,
            bar: "The Rusty Anchor".to_string(),
            deal: "$3 drafts & half-off apps".to_string(),
            hours: "4pm – 7pm".to_string(),
            rating: 4.5,
            distance: "0.2 mi".to_string(),
            tags: vec!["Beer".to_string(), "Food".to_string()],
        },
        Deal {
            id: 2,
            bar: "Neon Lounge".to_string(),
            deal: "2-for-1 cocktails".to_string(),
            hours: "5pm – 8pm".to_string(),
            rating: 4.2,
            distance: "0.5 mi".to_string(),
            tags: vec!["Cocktails".to_string()],
        },
        Deal {
            id: 3,
            bar: "Barrel & Vine".to_string(),
            deal: "$5 wine & $4 well drinks".to_string(),
            hours: "3pm – 6pm".to_string(),
            rating: 4.8,
            distance: "0.8 mi".to_string(),
            tags: vec!["Wine".to_string(), "Spirits".to_string()],
        },
    ]
}

pub fn filter_deals<'a>(deals: &'a [Deal], query: &str) -> Vec<&'a Deal> {
    deals.iter().filter(|deal| deal.matches(query)).collect()
}
