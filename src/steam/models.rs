use std::fmt::Display;

use serde::Deserialize;
use time::OffsetDateTime;

/// Numeric account identifier, kept as the string the api returns it as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteamId(pub String);

impl Display for SteamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SteamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ResolveVanityUrlResponse {
    #[serde(default)]
    pub response: VanityResolution,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VanityResolution {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    pub success: i64,
}

impl VanityResolution {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RecentlyPlayedResponse {
    #[serde(default)]
    pub response: RecentlyPlayedList,
}

/// Games in the order the api listed them.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecentlyPlayedList {
    pub games: Vec<RecentlyPlayedGame>,
}

impl RecentlyPlayedList {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.games.iter().map(|game| game.name.clone()).collect()
    }

    pub fn app_ids(&self) -> Vec<u32> {
        self.games.iter().map(|game| game.app_id).collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecentlyPlayedGame {
    #[serde(rename = "appid")]
    pub app_id: u32,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PlayerAchievementsResponse {
    #[serde(rename = "playerstats", default)]
    pub player_stats: TitleAchievements,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TitleAchievements {
    #[serde(rename = "gameName")]
    pub game_name: String,
    pub achievements: Vec<Achievement>,
    #[serde(rename = "error")]
    pub error_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Achievement {
    /// Unix timestamp, 0 while still locked.
    #[serde(rename = "unlocktime")]
    pub unlock_time: i64,
    pub name: String,
    pub description: String,
}

impl Achievement {
    pub fn is_unlocked(&self) -> bool {
        self.unlock_time > 0
    }

    pub fn unlocked_at(&self) -> Option<OffsetDateTime> {
        if !self.is_unlocked() {
            return None;
        }

        OffsetDateTime::from_unix_timestamp(self.unlock_time).ok()
    }
}
