use crate::category::MatchCategory;
use crate::config::Config;
use crate::error::AppError;
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;
use super::MatchSource;

const USER_AGENT: &str = "league_usage/0.1.0";

pub struct RiotApiClient {
    config: Config,
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let clock = DefaultClock::default();
        let rate_limiter = RateLimiter::direct_with_clock(Quota::per_second(per_second), clock.clone());

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build();

        RiotApiClient {
            config,
            agent,
            rate_limiter,
            clock,
        }
    }

    /// Blocks until the per-second ceiling admits another request.
    fn throttle(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.throttle();
        debug!("GET {}", url);

        let mut request = self.agent.get(url).set("X-Riot-Token", &self.config.api_key);
        for (key, value) in query {
            request = request.query(key, value);
        }

        match request.call() {
            Ok(resp) => resp
                .into_json::<T>()
                .map_err(|e| AppError::JsonError(e.to_string())),
            Err(ureq::Error::Status(429, _)) => Err(AppError::RateLimited),
            Err(ureq::Error::Status(code, resp)) => Err(AppError::HttpError(format!(
                "status {} {}",
                code,
                resp.status_text()
            ))),
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }
}

impl MatchSource for RiotApiClient {
    fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_by_riot_id(&self.config.api_base_url(), game_name, tag_line);
        self.execute_request(&url, &[])
    }

    fn match_ids(
        &self,
        puuid: &str,
        category: MatchCategory,
        count: usize,
        start: usize,
    ) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(&self.config.api_base_url(), puuid);
        let count = count.min(endpoints::MAX_IDS_PER_PAGE);
        self.execute_request(
            &url,
            &[
                ("queue", category.queue_id().to_string()),
                ("start", start.to_string()),
                ("count", count.to_string()),
            ],
        )
    }

    fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = endpoints::match_by_id(&self.config.api_base_url(), match_id);
        self.execute_request(&url, &[])
    }
}
