use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChampionTally {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl ChampionTally {
    pub fn record(&mut self, won: bool) {
        self.games += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Per-champion tallies for one run.
#[derive(Debug, Default)]
pub struct ChampionStatsTracker {
    stats: BTreeMap<String, ChampionTally>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        ChampionStatsTracker::default()
    }

    pub fn add_game(&mut self, champion_name: &str, won: bool) {
        self.stats
            .entry(champion_name.to_string())
            .or_default()
            .record(won);
    }

    /// One row per champion, sorted by games then win rate, both descending.
    pub fn into_rows(self) -> Vec<UsageRow> {
        let mut rows: Vec<UsageRow> = self
            .stats
            .into_iter()
            .map(|(champion, tally)| UsageRow::from_tally(champion, tally))
            .collect();
        rows.sort_by(UsageRow::report_order);
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

impl UsageRow {
    pub fn from_tally(champion: String, tally: ChampionTally) -> Self {
        UsageRow {
            champion,
            games: tally.games,
            wins: tally.wins,
            losses: tally.losses,
            win_rate: round2(tally.win_rate()),
        }
    }

    pub fn report_order(a: &UsageRow, b: &UsageRow) -> Ordering {
        b.games
            .cmp(&a.games)
            .then_with(|| b.win_rate.partial_cmp(&a.win_rate).unwrap_or(Ordering::Equal))
            .then_with(|| a.champion.cmp(&b.champion))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageReport {
    pub rows: Vec<UsageRow>,
    pub matches_processed: usize,
    /// One line per skipped category or match.
    pub notices: Vec<String>,
    /// True when a cutoff stopped the run before all matches were seen.
    pub cancelled: bool,
}

impl UsageReport {
    pub fn empty() -> Self {
        UsageReport::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
