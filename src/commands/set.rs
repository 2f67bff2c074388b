use tracing::info;

use crate::repository::UserStore;

use super::{CommandResult, USERNAME_NEEDED};

pub async fn set_user(users: &dyn UserStore, nick: &str, username: Option<&str>) -> CommandResult {
    let Some(username) = username else {
        return Ok(USERNAME_NEEDED.to_string());
    };

    users.put(nick, username).await?;

    info!("Stored steam user {username} for {nick}");

    Ok(format!("set {nick}'s user to {username}"))
}
