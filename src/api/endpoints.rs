// URL builders for the account-v1 and match-v5 endpoints.

use urlencoding::encode;

/// Upstream maximum for a single match-id listing request.
pub const MAX_IDS_PER_PAGE: usize = 100;

pub fn account_by_riot_id(base: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        base,
        encode(game_name),
        encode(tag_line)
    )
}

pub fn match_ids_by_puuid(base: &str, puuid: &str) -> String {
    format!("{}/lol/match/v5/matches/by-puuid/{}/ids", base, encode(puuid))
}

pub fn match_by_id(base: &str, match_id: &str) -> String {
    format!("{}/lol/match/v5/matches/{}", base, encode(match_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://asia.api.riotgames.com";

    #[test]
    fn account_path_is_percent_encoded() {
        assert_eq!(
            account_by_riot_id(BASE, "Hide on bush", "KR1"),
            "https://asia.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
    }

    #[test]
    fn match_paths() {
        assert_eq!(
            match_ids_by_puuid(BASE, "abc"),
            "https://asia.api.riotgames.com/lol/match/v5/matches/by-puuid/abc/ids"
        );
        assert_eq!(
            match_by_id(BASE, "KR_7000"),
            "https://asia.api.riotgames.com/lol/match/v5/matches/KR_7000"
        );
    }
}
