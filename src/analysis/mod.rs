pub mod aggregator;
pub mod champion_stats;
pub mod session;
