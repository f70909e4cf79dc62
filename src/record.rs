use serde::{Deserialize, Serialize};

/// Forum member group, classified from the free-text position label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Banned,
    Retired,
    Moderator,
    Team,
    Member,
    Other,
}

impl Category {
    /// Rules are checked in order and the first match wins. Matching is
    /// case-sensitive; "Banned" must match exactly, the rest are substrings.
    pub fn classify(label: &str) -> Self {
        let label = label.trim();
        if label == "Banned" {
            Category::Banned
        } else if label.contains("Retired") {
            Category::Retired
        } else if label.contains("Moderator") {
            Category::Moderator
        } else if label.contains("Team") {
            Category::Team
        } else if label.contains("Member") {
            Category::Member
        } else {
            Category::Other
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Category::Banned => "BAN",
            Category::Retired => "RET",
            Category::Moderator => "MOD",
            Category::Team => "TEM",
            Category::Member => "MEM",
            Category::Other => "OTH",
        }
    }
}

/// One ranked participant as scraped from the member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub identity: u64,
    pub display_name: String,
    /// Position label exactly as the forum shows it.
    pub category: String,
    pub count: u64,
}

impl EntityRecord {
    pub fn category(&self) -> Category {
        Category::classify(&self.category)
    }
}

/// Stable sort by count, highest first. Ties keep scrape order.
pub fn rank(mut records: Vec<EntityRecord>) -> Vec<EntityRecord> {
    records.sort_by_key(|r| std::cmp::Reverse(r.count));
    records
}
