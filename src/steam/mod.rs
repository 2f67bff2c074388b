mod error;
mod models;
pub mod newest;
mod transport;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use error::SteamError;
pub use models::{Achievement, RecentlyPlayedList, SteamId, TitleAchievements};
pub use transport::{HttpTransport, ReqwestTransport};

use models::{PlayerAchievementsResponse, RecentlyPlayedResponse, ResolveVanityUrlResponse};

pub const DEFAULT_API_URL: &str = "https://api.steampowered.com";

const RESOLVE_VANITY_URL_PATH: &str = "/ISteamUser/ResolveVanityURL/v1/";
const RECENTLY_PLAYED_PATH: &str = "/IPlayerService/GetRecentlyPlayedGames/v1/";
const PLAYER_ACHIEVEMENTS_PATH: &str = "/ISteamUserStats/GetPlayerAchievements/v0001/";

/// Value of `playerstats.error` when the owner hides their stats.
pub const PROFILE_NOT_PUBLIC: &str = "Profile is not public";

/// Client for the three Steam Web API calls the plugin needs.
///
/// Every method performs exactly one request through the transport. There are
/// no retries and nothing is cached.
pub struct SteamClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: Url,
}

impl SteamClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_key: impl Into<String>,
        base_url: Url,
    ) -> SteamClient {
        SteamClient {
            transport,
            api_key: api_key.into(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{path}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .extend_pairs(params);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SteamError> {
        debug!("GET {}", url.path());

        let body = self.transport.get(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Resolves a vanity username to the account id.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_id(&self, username: &str) -> Result<SteamId, SteamError> {
        let url = self.endpoint(RESOLVE_VANITY_URL_PATH, &[("vanityurl", username)]);
        let resolution = self
            .get_json::<ResolveVanityUrlResponse>(url)
            .await?
            .response;

        if !resolution.is_success() {
            return Err(SteamError::NotFound);
        }

        Ok(SteamId(resolution.steam_id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn recently_played(
        &self,
        steam_id: &SteamId,
    ) -> Result<RecentlyPlayedList, SteamError> {
        let url = self.endpoint(RECENTLY_PLAYED_PATH, &[("steamid", steam_id.as_ref())]);
        let response = self.get_json::<RecentlyPlayedResponse>(url).await?;

        Ok(response.response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn achievements(
        &self,
        steam_id: &SteamId,
        app_id: u32,
    ) -> Result<TitleAchievements, SteamError> {
        let app_id = app_id.to_string();
        let url = self.endpoint(
            PLAYER_ACHIEVEMENTS_PATH,
            &[
                ("steamid", steam_id.as_ref()),
                ("appid", &app_id),
                ("format", "json"),
                ("l", "en"),
            ],
        );
        let stats = self
            .get_json::<PlayerAchievementsResponse>(url)
            .await?
            .player_stats;

        if stats.error_text == PROFILE_NOT_PUBLIC {
            return Err(SteamError::NotPublic);
        }

        Ok(stats)
    }
}
