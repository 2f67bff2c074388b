use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, warn, Instrument};

use super::{Message, Publisher, Router, INPUT_TOPIC, MODULE_NAME, OUTPUT_TOPIC};

const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const REQUEST_CHANNEL_CAPACITY: usize = 64;

pub struct MqttBus {
    client: AsyncClient,
    event_loop: EventLoop,
}

impl MqttBus {
    /// Prepares a connection to `broker` given as `host:port`. Nothing is sent until [`MqttBus::run`].
    pub fn new(broker: &str) -> Result<MqttBus, anyhow::Error> {
        let (host, port) = parse_broker(broker)?;

        let mut options = MqttOptions::new(format!("gowon_{MODULE_NAME}"), host, port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, event_loop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);

        Ok(MqttBus { client, event_loop })
    }

    pub fn client(&self) -> AsyncClient {
        self.client.clone()
    }

    /// Polls the broker forever, handling every inbound message on its own task.
    pub async fn run(mut self, router: Arc<Router>) -> Result<(), anyhow::Error> {
        let publisher = Arc::new(MqttPublisher {
            client: self.client.clone(),
        });

        info!("Connecting to broker");

        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("Connected to broker");

                    // Subscriptions do not survive a reconnect.
                    resubscribe(&self.client);
                }

                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let router = router.clone();
                    let publisher = publisher.clone();
                    let span = info_span!("bus_message", topic = %publish.topic);

                    tokio::spawn(
                        async move {
                            if let Err(err) = router
                                .handle_payload(&publish.payload, publisher.as_ref())
                                .await
                            {
                                error!("Could not publish a reply: {err:#}");
                            }
                        }
                        .instrument(span),
                    );
                }

                Ok(_) => {}

                Err(err) => {
                    warn!("Connection to broker lost: {err}");
                    tokio::time::sleep(RECONNECT_INTERVAL).await;
                    info!("Attempting to reconnect to broker");
                }
            }
        }
    }
}

/// Queues the input topic subscription without blocking the caller.
///
/// The request channel is only drained by the event loop, so the loop itself
/// must never wait on it.
fn resubscribe(client: &AsyncClient) -> JoinHandle<()> {
    let client = client.clone();

    tokio::spawn(async move {
        if let Err(err) = client.subscribe(INPUT_TOPIC, QoS::AtMostOnce).await {
            error!("Could not subscribe to {INPUT_TOPIC}: {err}");
        }
    })
}

struct MqttPublisher {
    client: AsyncClient,
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, message: &Message) -> Result<(), anyhow::Error> {
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(OUTPUT_TOPIC, QoS::AtMostOnce, false, payload)
            .await?;

        Ok(())
    }
}

fn parse_broker(broker: &str) -> Result<(String, u16), anyhow::Error> {
    let (host, port) = broker
        .rsplit_once(':')
        .with_context(|| format!("broker `{broker}` must be given as host:port"))?;

    if host.is_empty() {
        anyhow::bail!("broker `{broker}` has an empty host");
    }

    let port = port
        .parse()
        .with_context(|| format!("invalid broker port in `{broker}`"))?;

    Ok((host.to_string(), port))
}
