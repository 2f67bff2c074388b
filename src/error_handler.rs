use tracing::{error, warn};

use crate::{bus::Message, commands::CommandError, steam::SteamError};

pub const INTERNAL_ERROR: &str = "Error: something went wrong while running the steam command";

/// Logs a failed command and returns the reply shown to the user instead.
pub fn handle_error(error: &CommandError, message: &Message) -> String {
    use SteamError::*;

    match error {
        CommandError::Steam(Transport(error)) => {
            error!("Could not reach the steam api for {}: {}", message.nick, error);
        }

        CommandError::Steam(Decode(error)) => {
            error!(
                "Could not decode a steam api response for {}: {}",
                message.nick, error
            );
        }

        CommandError::Steam(error @ (NotFound | NotPublic)) => {
            warn!("Unhandled steam error for {}: {}", message.nick, error);
        }

        CommandError::Storage(error) => {
            error!("User storage error for {}: {:#}", message.nick, error);
        }
    }

    INTERNAL_ERROR.to_string()
}
