use crate::api::MatchSource;
use crate::error::AppError;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// A Riot ID, `Name#TAG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHandle {
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerHandle {
    pub fn new(game_name: &str, tag_line: &str) -> Result<Self, AppError> {
        let game_name = game_name.trim();
        let tag_line = tag_line.trim();

        if game_name.is_empty() {
            return Err(AppError::PreconditionError(format!(
                "player name is empty (tag \"{}\")",
                tag_line
            )));
        }
        if tag_line.is_empty() {
            return Err(AppError::PreconditionError(format!(
                "tag is empty for player \"{}\"",
                game_name
            )));
        }

        Ok(PlayerHandle {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl FromStr for PlayerHandle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, tag) = s
            .rsplit_once('#')
            .ok_or_else(|| AppError::InvalidRiotId(s.to_string()))?;
        PlayerHandle::new(name, tag)
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Opaque PUUID; the join key into match participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(puuid: impl Into<String>) -> Self {
        PlayerId(puuid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct IdentityResolver<S> {
    source: S,
}

impl<S: MatchSource> IdentityResolver<S> {
    pub fn new(source: S) -> Self {
        IdentityResolver { source }
    }

    /// One account lookup, no retry. Failures carry the handle.
    pub fn resolve(&self, handle: &PlayerHandle) -> Result<PlayerId, AppError> {
        let account = self
            .source
            .account_by_riot_id(&handle.game_name, &handle.tag_line)
            .map_err(|e| AppError::LookupError {
                handle: handle.to_string(),
                reason: e.to_string(),
            })?;

        if account.puuid.trim().is_empty() {
            return Err(AppError::LookupError {
                handle: handle.to_string(),
                reason: "account response carried an empty puuid".to_string(),
            });
        }

        // Riot returns the canonical casing of the name, which may differ from the input.
        let canonical = match (&account.game_name, &account.tag_line) {
            (Some(name), Some(tag)) => format!("{}#{}", name, tag),
            _ => handle.to_string(),
        };
        let player = PlayerId::new(account.puuid);
        debug!("Resolved {} ({}) to {}", handle, canonical, player.short());
        Ok(player)
    }

    /// Validates the raw parts before any network call.
    pub fn resolve_parts(&self, game_name: &str, tag_line: &str) -> Result<PlayerId, AppError> {
        let handle = PlayerHandle::new(game_name, tag_line)?;
        self.resolve(&handle)
    }
}
