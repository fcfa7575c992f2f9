//! Classroom Attention Pipeline - Main Entry Point

use anyhow::Result;
use landmark_feed::LandmarkFrame;
use runtime::{init_logging, spawn_session, Settings};
use status_sync::StatusSync;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!(
        "=== Classroom Attention Pipeline v{} ===",
        env!("CARGO_PKG_VERSION")
    );

    let settings = Settings::load()?;

    let (signal_tx, signal_rx) = mpsc::channel(8);
    let mut sync = StatusSync::new(settings.sync.clone());
    if let Err(e) = sync.connect(signal_tx).await {
        warn!("Running without transport: {}", e);
    }

    let handle = spawn_session(&settings, sync, signal_rx);

    // The external mesh runtime pipes landmark frames in as JSON lines
    let frames = handle.frames.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match serde_json::from_str::<LandmarkFrame>(&line) {
                Ok(frame) => match frame.validate() {
                    Ok(()) => frames.send(frame),
                    Err(e) => warn!("Skipping invalid frame: {}", e),
                },
                Err(e) => warn!("Skipping malformed frame: {}", e),
            }
        }
    });

    handle.finished().await;
    info!("Session ended");
    Ok(())
}
