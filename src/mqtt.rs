use rumqttc::v5::MqttOptions;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::error::MqttError;
use crate::status::ClockStatus;

/// How often the latest [`ClockStatus`] is published. The render loop
/// refreshes the status every tick; the broker only needs a sample.
const STATUS_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

pub async fn run(
    config: crate::config::MqttConfig,
    cancellation_token: CancellationToken,
    event_sender: mpsc::Sender<crate::event::Event>,
    status_receiver: watch::Receiver<ClockStatus>,
) -> Result<(), MqttError> {
    let mut mqttoptions =
        MqttOptions::new(&config.client_name, config.host.to_string(), config.port);
    mqttoptions.set_keep_alive(config.keep_alive);

    let (client, mut eventloop) = rumqttc::v5::AsyncClient::new(mqttoptions, 100);

    let command_topic = format!("{prefix}/events", prefix = config.topic_prefix);
    let status_topic = format!("{prefix}/status", prefix = config.topic_prefix);
    let qos = rumqttc::v5::mqttbytes::QoS::from(config.qos);

    let Some(sub_result) = cancellation_token
        .run_until_cancelled(client.subscribe(&command_topic, qos))
        .await
    else {
        tracing::info!("Cancelled, shutting down MQTT processing");
        return Ok(());
    };
    tracing::info!("Successfully subscribed to {command_topic}");

    sub_result.map_err(MqttError::Subscribing)?;

    let mut status_interval = tokio::time::interval(STATUS_INTERVAL);

    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                tracing::info!("Cancelled, shutting down MQTT processing");
                break;
            }

            event = eventloop.poll() => {
                let event = event.map_err(MqttError::Connection)?;
                forward_incoming(event, &event_sender).await;
            }

            _tick = status_interval.tick() => {
                let status = status_receiver.borrow().clone();
                let payload = match serde_json::to_vec(&status) {
                    Ok(payload) => payload,
                    Err(error) => {
                        tracing::error!(?error, "Failed to serialize status");
                        continue;
                    }
                };

                client
                    .publish(&status_topic, qos, false, payload)
                    .await
                    .map_err(MqttError::Publishing)?;
                tracing::trace!(display = %status.display, "Published status");
            }
        }
    }

    Ok(())
}

async fn forward_incoming(
    event: rumqttc::v5::Event,
    event_sender: &mpsc::Sender<crate::event::Event>,
) {
    match event {
        rumqttc::v5::Event::Incoming(rumqttc::v5::Incoming::Publish(
            rumqttc::v5::mqttbytes::v5::Publish {
                dup: _,
                qos: _,
                retain: _,
                topic,
                pkid: _,
                payload,
                properties: _,
            },
        )) => {
            tracing::debug!(?topic, ?payload, "Received payload");

            let event: crate::event::Event = match serde_json::from_slice(&payload) {
                Ok(event) => {
                    tracing::debug!(?event, "Deserialized event successfully");
                    event
                }
                Err(error) => {
                    tracing::debug!(?error, "Failed to deserialize event, ignoring");
                    return;
                }
            };

            if let Err(event) = event_sender.send(event).await {
                tracing::error!(?event, "Failed to send event to internal channel");
            }
        }

        rumqttc::v5::Event::Incoming(_) => {
            // nothing
        }

        rumqttc::v5::Event::Outgoing(_outgoing) => {
            // nothing
        }
    }
}
