mod achievement;
mod arguments;
mod recent;
mod set;

use std::str::FromStr;

use strum::EnumString;

use crate::{
    steam::{RecentlyPlayedList, SteamClient, SteamError, SteamId},
    BotState,
};

use arguments::CommandArguments;

pub use achievement::last_achievement;
pub use recent::last_game;

pub type CommandResult = Result<String, CommandError>;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Steam(#[from] SteamError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub const USAGE: &str = "one of [s]et, [r]ecent or [a]chievements must be passed as a command";
pub const USERNAME_NEEDED: &str = "Error: username needed";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
enum Subcommand {
    #[strum(serialize = "s", serialize = "set")]
    Set,
    #[strum(serialize = "r", serialize = "recent")]
    Recent,
    #[strum(serialize = "a", serialize = "achievement")]
    Achievement,
}

/// Runs `<subcommand> [username]` on behalf of `nick` and returns the reply text.
#[tracing::instrument(skip(state))]
pub async fn dispatch(state: &BotState, nick: &str, args: &str) -> CommandResult {
    let arguments = CommandArguments::parse(args);

    let Some(subcommand) = arguments
        .subcommand
        .and_then(|subcommand| Subcommand::from_str(subcommand).ok())
    else {
        return Ok(USAGE.to_string());
    };

    match subcommand {
        Subcommand::Set => {
            set::set_user(state.user_repository.as_ref(), nick, arguments.username).await
        }

        Subcommand::Recent => {
            let Some(username) = target_username(state, nick, arguments.username).await? else {
                return Ok(USERNAME_NEEDED.to_string());
            };

            Ok(last_game(&state.steam, &username).await?)
        }

        Subcommand::Achievement => {
            let Some(username) = target_username(state, nick, arguments.username).await? else {
                return Ok(USERNAME_NEEDED.to_string());
            };

            Ok(last_achievement(&state.steam, &username).await?)
        }
    }
}

/// An explicit username wins over the one stored for `nick`.
async fn target_username(
    state: &BotState,
    nick: &str,
    explicit: Option<&str>,
) -> Result<Option<String>, CommandError> {
    if let Some(username) = explicit {
        return Ok(Some(username.to_string()));
    }

    let stored = state.user_repository.get(nick).await?;

    Ok(stored.filter(|username| !username.is_empty()))
}

fn no_id_found(username: &str) -> String {
    format!("Error: no id found for {username}")
}

/// Resolves `username` and fetches its recently played games.
///
/// Returns `None` when the username does not resolve to an id.
async fn lookup_recently_played(
    steam: &SteamClient,
    username: &str,
) -> Result<Option<(SteamId, RecentlyPlayedList)>, SteamError> {
    let steam_id = match steam.resolve_id(username).await {
        Ok(steam_id) => steam_id,
        Err(SteamError::NotFound) => return Ok(None),
        Err(err) => return Err(err),
    };

    let games = steam.recently_played(&steam_id).await?;

    Ok(Some((steam_id, games)))
}
