use clap::ValueEnum;
use std::fmt;

/// Queue types a match listing can be restricted to.
/// See https://static.developer.riotgames.com/docs/lol/queues.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum MatchCategory {
    #[value(name = "solo")]
    RankedSolo,
    #[value(name = "flex")]
    RankedFlex,
    #[value(name = "normal")]
    Normal,
}

impl MatchCategory {
    pub const ALL: [MatchCategory; 3] = [
        MatchCategory::RankedSolo,
        MatchCategory::RankedFlex,
        MatchCategory::Normal,
    ];

    pub fn queue_id(self) -> u16 {
        match self {
            MatchCategory::RankedSolo => 420,
            MatchCategory::RankedFlex => 440,
            MatchCategory::Normal => 430,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchCategory::RankedSolo => "Ranked Solo/Duo",
            MatchCategory::RankedFlex => "Ranked Flex",
            MatchCategory::Normal => "Normal",
        }
    }

    /// Drops repeated categories, keeping first-seen order.
    pub fn dedup(categories: &[MatchCategory]) -> Vec<MatchCategory> {
        let mut unique = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique.contains(category) {
                unique.push(*category);
            }
        }
        unique
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.queue_id())
    }
}
