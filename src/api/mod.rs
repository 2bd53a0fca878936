pub mod client;
pub mod endpoints;
pub mod models;

use crate::category::MatchCategory;
use crate::error::AppError;
use models::{AccountDto, MatchDto};

/// The three upstream calls the resolver and aggregator depend on.
pub trait MatchSource {
    fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError>;

    /// Most recent first, at most `count` ids starting at offset `start`.
    fn match_ids(
        &self,
        puuid: &str,
        category: MatchCategory,
        count: usize,
        start: usize,
    ) -> Result<Vec<String>, AppError>;

    fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError>;
}

impl<T: MatchSource + ?Sized> MatchSource for &T {
    fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        (**self).account_by_riot_id(game_name, tag_line)
    }

    fn match_ids(
        &self,
        puuid: &str,
        category: MatchCategory,
        count: usize,
        start: usize,
    ) -> Result<Vec<String>, AppError> {
        (**self).match_ids(puuid, category, count, start)
    }

    fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        (**self).match_detail(match_id)
    }
}
