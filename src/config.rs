use crate::error::AppError;
use std::env;
use std::str::FromStr;

const DEFAULT_REGION: &str = "kr";
const DEFAULT_PACE_MS: u64 = 200;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    /// Overrides the regional routing host, e.g. for a local mock server.
    pub api_base: Option<String>,
    pub pace_ms: u64,
    pub requests_per_second: u32,
    pub timeout_secs: u64,
}

impl Config {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            region: region.into(),
            api_base: None,
            pace_ms: DEFAULT_PACE_MS,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(get: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = get("RIOT_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
            })?;

        let region = get("RIOT_REGION")
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let api_base = get("RIOT_API_BASE")
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty());

        Ok(Config {
            api_key,
            region,
            api_base,
            pace_ms: parse_var(&get, "RIOT_PACE_MS", DEFAULT_PACE_MS)?,
            requests_per_second: parse_var(&get, "RIOT_REQUESTS_PER_SECOND", DEFAULT_REQUESTS_PER_SECOND)?,
            timeout_secs: parse_var(&get, "RIOT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    pub fn regional_routing(&self) -> &str {
        match self.region.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
            _ => "asia",
        }
    }

    /// Base URL for account and match endpoints.
    pub fn api_base_url(&self) -> String {
        match &self.api_base {
            Some(base) => base.clone(),
            None => format!("https://{}.api.riotgames.com", self.regional_routing()),
        }
    }
}

fn parse_var<F, T>(get: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("{} must be a non-negative integer, got \"{}\"", key, raw))
        }),
        _ => Ok(default),
    }
}
