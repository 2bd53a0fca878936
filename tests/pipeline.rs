use league_usage::api::models::{AccountDto, MatchDto, MatchInfo, ParticipantDto};
use league_usage::rate_limit::NoPause;
use league_usage::{
    analyze_players, AppError, IdentityResolver, MatchCategory, MatchSource, PlayerHandle,
    UsageAggregator, UsageRow,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

/// Two players who shared one ranked match.
struct Ladder {
    accounts: HashMap<&'static str, &'static str>,
    history: HashMap<(&'static str, u16), Vec<&'static str>>,
    matches: HashMap<&'static str, Vec<(&'static str, &'static str, bool)>>,
}

impl Ladder {
    fn new() -> Self {
        let accounts = HashMap::from([("Faker#KR1", "p-faker"), ("Keria#KR1", "p-keria")]);
        let history = HashMap::from([
            (("p-faker", 420), vec!["KR_3", "KR_2", "KR_1"]),
            (("p-faker", 430), vec!["KR_9"]),
            (("p-keria", 420), vec!["KR_3", "KR_4"]),
        ]);
        let matches = HashMap::from([
            ("KR_1", vec![("p-faker", "Ahri", true)]),
            ("KR_2", vec![("p-faker", "Ahri", false)]),
            ("KR_3", vec![("p-faker", "Lux", true), ("p-keria", "Thresh", true)]),
            ("KR_4", vec![("p-keria", "Rakan", false)]),
            ("KR_9", vec![("p-faker", "Ryze", false)]),
        ]);
        Ladder {
            accounts,
            history,
            matches,
        }
    }
}

impl MatchSource for Ladder {
    fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let key = format!("{}#{}", game_name, tag_line);
        self.accounts
            .get(key.as_str())
            .map(|puuid| AccountDto {
                puuid: puuid.to_string(),
                game_name: Some(game_name.to_string()),
                tag_line: Some(tag_line.to_string()),
            })
            .ok_or_else(|| AppError::HttpError("status 404 Not Found".to_string()))
    }

    fn match_ids(
        &self,
        puuid: &str,
        category: MatchCategory,
        count: usize,
        start: usize,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .history
            .iter()
            .find(|((p, q), _)| *p == puuid && *q == category.queue_id())
            .map(|(_, ids)| ids.iter().skip(start).take(count).map(|s| s.to_string()).collect())
            .unwrap_or_default())
    }

    fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let participants = self
            .matches
            .get(match_id)
            .ok_or_else(|| AppError::HttpError("status 404 Not Found".to_string()))?
            .iter()
            .map(|(puuid, champion, win)| ParticipantDto {
                puuid: puuid.to_string(),
                champion_name: champion.to_string(),
                win: *win,
            })
            .collect();
        Ok(MatchDto {
            metadata: None,
            info: MatchInfo {
                queue_id: None,
                participants,
            },
        })
    }
}

fn handles(raw: &[&str]) -> Vec<PlayerHandle> {
    raw.iter().map(|h| h.parse().unwrap()).collect()
}

fn row(champion: &str, games: u32, wins: u32, win_rate: f64) -> UsageRow {
    UsageRow {
        champion: champion.to_string(),
        games,
        wins,
        losses: games - wins,
        win_rate,
    }
}

#[test]
fn each_player_gets_an_independent_report() {
    let ladder = Ladder::new();
    let resolver = IdentityResolver::new(&ladder);
    let mut aggregator = UsageAggregator::new(&ladder, NoPause);

    let results = analyze_players(
        &resolver,
        &mut aggregator,
        &handles(&["Faker#KR1", "Keria#KR1"]),
        &[MatchCategory::RankedSolo, MatchCategory::Normal],
        10,
    )
    .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].handle.to_string(), "Faker#KR1");
    assert_eq!(
        results[0].report.rows,
        vec![row("Ahri", 2, 1, 0.5), row("Lux", 1, 1, 1.0), row("Ryze", 1, 0, 0.0)]
    );
    // KR_3 was already counted for Faker; Keria's run keeps its own seen set.
    assert_eq!(
        results[1].report.rows,
        vec![row("Thresh", 1, 1, 1.0), row("Rakan", 1, 0, 0.0)]
    );
}

#[test]
fn unknown_handle_does_not_block_the_others() {
    let ladder = Ladder::new();
    let resolver = IdentityResolver::new(&ladder);
    let mut aggregator = UsageAggregator::new(&ladder, NoPause);

    let results = analyze_players(
        &resolver,
        &mut aggregator,
        &handles(&["Ghost#KR1", "Keria#KR1"]),
        &[MatchCategory::RankedSolo],
        10,
    )
    .unwrap();

    assert!(results[0].report.is_empty());
    match &results[0].error {
        Some(AppError::LookupError { handle, .. }) => assert_eq!(handle, "Ghost#KR1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(results[1].error.is_none());
    assert_eq!(results[1].report.matches_processed, 2);
}

#[test]
fn precondition_failure_is_returned() {
    let ladder = Ladder::new();
    let resolver = IdentityResolver::new(&ladder);
    let mut aggregator = UsageAggregator::new(&ladder, NoPause);

    let err = analyze_players(
        &resolver,
        &mut aggregator,
        &handles(&["Faker#KR1"]),
        &[],
        10,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::PreconditionError(_)));
}
