use serde::{Deserialize, Serialize};
use std::fmt;

/// Place type a single category search is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bar,
    Restaurant,
    NightClub,
    Brewery,
}

impl Category {
    /// Wire name understood by the places provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bar => "bar",
            Category::Restaurant => "restaurant",
            Category::NightClub => "night_club",
            Category::Brewery => "brewery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
