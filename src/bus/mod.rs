mod mqtt;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{commands, error_handler::handle_error, BotState};

pub use mqtt::MqttBus;

pub const MODULE_NAME: &str = "steam";
pub const INPUT_TOPIC: &str = "/gowon/input";
pub const OUTPUT_TOPIC: &str = "/gowon/output";

/// A chat message as exchanged on the gowon bus.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub module: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nick: String,
    pub dest: String,
    pub msg: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub args: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &Message) -> Result<(), anyhow::Error>;
}

/// Picks `steam` commands out of the bus traffic and answers them.
pub struct Router {
    prefix: String,
    state: Arc<BotState>,
}

impl Router {
    pub fn new(prefix: impl Into<String>, state: Arc<BotState>) -> Router {
        Router {
            prefix: prefix.into(),
            state,
        }
    }

    /// Arguments of the command, or `None` when the message is not for this module.
    fn command_args<'a>(&self, message: &'a Message) -> Option<&'a str> {
        if !message.command.is_empty() {
            return (message.command == MODULE_NAME).then(|| message.args.trim());
        }

        let rest = message.msg.strip_prefix(self.prefix.as_str())?;
        let (command, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

        (command == MODULE_NAME).then(|| args.trim())
    }

    pub async fn handle(&self, message: &Message) -> Option<Message> {
        let args = self.command_args(message)?;

        let reply = match commands::dispatch(&self.state, &message.nick, args).await {
            Ok(reply) => reply,
            Err(err) => handle_error(&err, message),
        };

        Some(Message {
            module: MODULE_NAME.to_string(),
            dest: message.dest.clone(),
            msg: reply,
            ..Default::default()
        })
    }

    pub async fn handle_payload(
        &self,
        payload: &[u8],
        publisher: &dyn Publisher,
    ) -> Result<(), anyhow::Error> {
        let message = match serde_json::from_slice::<Message>(payload) {
            Ok(message) => message,
            Err(err) => {
                warn!("Ignoring malformed bus message: {err}");
                return Ok(());
            }
        };

        let Some(reply) = self.handle(&message).await else {
            return Ok(());
        };

        debug!("Replying to {} in {}", message.nick, message.dest);
        publisher.publish(&reply).await
    }
}
