use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::Url;

use super::{HttpTransport, SteamClient, SteamId, DEFAULT_API_URL};

/// Serves canned bodies keyed by full url, an empty body for anything else.
pub struct FakeTransport {
    bodies: HashMap<String, String>,
    unreachable: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(bodies: HashMap<String, String>) -> Arc<FakeTransport> {
        FakeTransport::unreachable(bodies, &[])
    }

    /// Like [`FakeTransport::new`], but requests to `urls` fail with a transport error.
    pub fn unreachable(bodies: HashMap<String, String>, urls: &[String]) -> Arc<FakeTransport> {
        Arc::new(FakeTransport {
            bodies,
            unreachable: urls.iter().cloned().collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<FakeTransport> {
        FakeTransport::new(HashMap::new())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<String, reqwest::Error> {
        self.requests.lock().unwrap().push(url.to_string());

        if self.unreachable.contains(url.as_str()) {
            return Err(transport_error());
        }

        Ok(self.bodies.get(url.as_str()).cloned().unwrap_or_default())
    }
}

/// A `reqwest::Error` built without touching the network.
pub fn transport_error() -> reqwest::Error {
    reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err()
}

pub fn client(transport: Arc<FakeTransport>) -> SteamClient {
    SteamClient::new(transport, "key", Url::parse(DEFAULT_API_URL).unwrap())
}

pub fn resolve_url(username: &str) -> String {
    client(FakeTransport::empty())
        .endpoint(super::RESOLVE_VANITY_URL_PATH, &[("vanityurl", username)])
        .to_string()
}

pub fn recently_played_url(steam_id: &str) -> String {
    client(FakeTransport::empty())
        .endpoint(super::RECENTLY_PLAYED_PATH, &[("steamid", steam_id)])
        .to_string()
}

pub fn achievements_url(steam_id: &str, app_id: u32) -> String {
    let id = SteamId(steam_id.to_string());
    let app_id = app_id.to_string();

    client(FakeTransport::empty())
        .endpoint(
            super::PLAYER_ACHIEVEMENTS_PATH,
            &[
                ("steamid", id.as_ref()),
                ("appid", &app_id),
                ("format", "json"),
                ("l", "en"),
            ],
        )
        .to_string()
}

pub const ID_FOUND: &str = r#"{"response":{"steamid":"999","success":1}}"#;
pub const ID_NOT_FOUND: &str = r#"{"response":{"success":42,"message":"No match"}}"#;
pub const NOT_PUBLIC: &str = r#"{"playerstats":{"error":"Profile is not public","success":false}}"#;

pub fn recently_played_body(games: &[(u32, &str)]) -> String {
    let games: Vec<_> = games
        .iter()
        .map(|(app_id, name)| serde_json::json!({ "appid": app_id, "name": name }))
        .collect();

    serde_json::json!({ "response": { "total_count": games.len(), "games": games } }).to_string()
}

pub fn achievements_body(game_name: &str, achievements: &[(&str, &str, i64)]) -> String {
    let achievements: Vec<_> = achievements
        .iter()
        .map(|(name, description, unlock_time)| {
            serde_json::json!({
                "apiname": name.to_uppercase(),
                "achieved": i64::from(*unlock_time > 0),
                "unlocktime": unlock_time,
                "name": name,
                "description": description,
            })
        })
        .collect();

    serde_json::json!({
        "playerstats": {
            "steamID": "999",
            "gameName": game_name,
            "achievements": achievements,
            "success": true,
        }
    })
    .to_string()
}
