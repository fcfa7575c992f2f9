//! Status Synchronization
//!
//! MQTT-based status publication for a class session:
//! - Edge-triggered status ledger with manual-status hold
//! - Best-effort JSON publication to the per-class status topic
//! - Control-topic subscription for session-finished / mode-change signals
//!
//! Publication is fire-and-forget: failures are logged and dropped, and the
//! classifier stays correct with no transport connected at all.

mod ledger;

pub use ledger::StatusLedger;

use attention::AttentionStatus;
use chrono::{FixedOffset, Utc};
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Status sync error types
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Subscribe failed: {0}")]
    Subscribe(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Status sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// MQTT broker host
    pub broker_url: String,
    /// MQTT port
    pub broker_port: u16,
    /// Class session identifier
    pub class_id: u64,
    /// Student identifier
    pub student_id: u64,
    /// Student display name
    pub student_name: String,
    /// Fixed UTC offset for `detected_at` timestamps (hours)
    pub utc_offset_hours: i32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            broker_url: "localhost".to_string(),
            broker_port: 1883,
            class_id: 0,
            student_id: 0,
            student_name: "unknown".to_string(),
            utc_offset_hours: 9,
        }
    }
}

/// Status-change message published to the class topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub class_id: u64,
    pub student_id: u64,
    pub student_name: String,
    #[serde(rename = "type")]
    pub status: AttentionStatus,
    /// Local time at the fixed UTC offset, RFC 3339
    pub detected_at: String,
}

/// Class-wide control signals received on the control topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionSignal {
    /// Teacher ended the class session; tear the pipeline down
    SessionFinished,
    /// Class switched modes (e.g. lecture to activity)
    ModeChange { mode: String },
}

/// MQTT status sync for one student session
pub struct StatusSync {
    config: SyncConfig,
    client: Option<AsyncClient>,
}

impl StatusSync {
    /// Create a disconnected sync
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Topic the student publishes status changes to
    pub fn status_topic(&self) -> String {
        format!("classes/{}/status", self.config.class_id)
    }

    /// Topic carrying class-wide control broadcasts
    pub fn control_topic(&self) -> String {
        format!("classes/{}/control", self.config.class_id)
    }

    /// Connect to the broker and subscribe to the control topic
    ///
    /// Parsed control signals are forwarded on `signals`; the eventloop task
    /// lives until the client is dropped.
    pub async fn connect(&mut self, signals: mpsc::Sender<SessionSignal>) -> Result<(), SyncError> {
        let client_id = format!("student-{}-{}", self.config.student_id, Uuid::new_v4());
        let mut options = MqttOptions::new(
            client_id,
            &self.config.broker_url,
            self.config.broker_port,
        );
        options.set_keep_alive(std::time::Duration::from_secs(30));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        client
            .subscribe(self.control_topic(), QoS::AtLeastOnce)
            .await
            .map_err(|e| SyncError::Subscribe(e.to_string()))?;

        // Eventloop handler: drives the connection and forwards control
        // signals to the runtime
        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        match serde_json::from_slice::<SessionSignal>(&publish.payload) {
                            Ok(signal) => {
                                debug!(?signal, "Control signal received");
                                if signals.send(signal).await.is_err() {
                                    // Runtime is gone; stop driving the loop
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Unparseable control message: {}", e);
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    }
                }
            }
        });

        self.client = Some(client);
        info!(
            broker = %self.config.broker_url,
            "Connected to status broker"
        );
        Ok(())
    }

    /// Whether a live transport session exists
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Publish one status change
    ///
    /// Errors are for the caller to log; publication is never retried.
    pub async fn publish_status(&self, status: AttentionStatus) -> Result<(), SyncError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SyncError::Connection("Not connected".to_string()))?;

        let event = StatusEvent {
            class_id: self.config.class_id,
            student_id: self.config.student_id,
            student_name: self.config.student_name.clone(),
            status,
            detected_at: detected_at(self.config.utc_offset_hours),
        };

        let payload =
            serde_json::to_vec(&event).map_err(|e| SyncError::Serialization(e.to_string()))?;

        client
            .publish(self.status_topic(), QoS::AtLeastOnce, false, payload)
            .await
            .map_err(|e| SyncError::Publish(e.to_string()))?;

        Ok(())
    }
}

/// Current time rendered at the configured fixed UTC offset
fn detected_at(offset_hours: i32) -> String {
    let seconds = offset_hours.clamp(-12, 14) * 3600;
    match FixedOffset::east_opt(seconds) {
        Some(offset) => Utc::now().with_timezone(&offset).to_rfc3339(),
        None => Utc::now().to_rfc3339(),
    }
}
