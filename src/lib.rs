//! Champion usage reports for League of Legends players.
//!
//! A Riot ID is resolved to a PUUID, recent matches are listed per queue,
//! and the player's own champion and result in each match are folded into
//! a per-champion tally, sorted by games played and win rate.

pub mod analysis;
pub mod api;
pub mod category;
pub mod config;
pub mod display;
pub mod error;
pub mod identity;
pub mod rate_limit;
pub mod scrim;

pub use analysis::aggregator::UsageAggregator;
pub use analysis::champion_stats::{UsageReport, UsageRow};
pub use analysis::session::{analyze_players, PlayerAnalysis};
pub use api::client::RiotApiClient;
pub use api::MatchSource;
pub use category::MatchCategory;
pub use config::Config;
pub use error::AppError;
pub use identity::{IdentityResolver, PlayerHandle, PlayerId};
