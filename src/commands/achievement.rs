use tracing::debug;

use crate::steam::{newest::select_newest, SteamClient, SteamError};

use super::{lookup_recently_played, no_id_found};

pub const PROFILE_NOT_PUBLIC: &str = "Error: profile is not public";

/// Finds the most recently unlocked achievement over the recently played games of `username`.
///
/// Achievements are fetched one game at a time and the first private game
/// stops the whole lookup.
#[tracing::instrument(skip(steam))]
pub async fn last_achievement(steam: &SteamClient, username: &str) -> Result<String, SteamError> {
    let Some((steam_id, games)) = lookup_recently_played(steam, username).await? else {
        return Ok(no_id_found(username));
    };

    let app_ids = games.app_ids();
    debug!(?app_ids, "Fetching achievements");

    let mut titles = Vec::with_capacity(app_ids.len());
    for app_id in app_ids {
        match steam.achievements(&steam_id, app_id).await {
            Ok(title) => titles.push(title),
            Err(SteamError::NotPublic) => return Ok(PROFILE_NOT_PUBLIC.to_string()),
            Err(err) => return Err(err),
        }
    }

    let Some(newest) = select_newest(&titles) else {
        return Ok(format!(
            "{username} has no recently unlocked steam achievements"
        ));
    };

    debug!(
        unlocked_at = ?newest.achievement.unlocked_at(),
        "Newest achievement is from {}",
        newest.title
    );

    Ok(format!("{username}'s last steam achievement: {newest}"))
}
