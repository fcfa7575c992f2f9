//! Session Runtime
//!
//! Wires the attention pipeline into a running class session:
//! - Bounded, lossy frame channel from the landmark source (frame context)
//! - Monitor task running extraction, smoothing, and classification
//! - Control task marshaling events to UI-facing state and the transport
//! - Teardown on session-finished signals or handle drop
//!
//! The frame context never touches UI state or the network; everything
//! crosses contexts through channels.

pub mod settings;

pub use settings::Settings;

use attention::{AttentionMonitor, AttentionStatus, MonitorEvent};
use landmark_feed::LandmarkFrame;
use status_sync::{SessionSignal, StatusLedger, StatusSync};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize global logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Frame-context entry point for the landmark source
///
/// Sends are non-blocking and lossy: a full queue drops the frame (the
/// pipeline is duration-based and tolerates drops), and a torn-down session
/// makes every send a no-op.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<LandmarkFrame>,
}

impl FrameSender {
    /// Offer one frame to the pipeline
    pub fn send(&self, frame: LandmarkFrame) {
        use mpsc::error::TrySendError;
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("Frame queue full, dropping frame"),
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

/// Student-initiated actions from the UI context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentCommand {
    /// Engage an explicit status (restroom / activity)
    SetManual(AttentionStatus),
    /// Return to automatic classification
    Resume,
}

/// Live handle to a running session
pub struct SessionHandle {
    /// Frame ingestion endpoint
    pub frames: FrameSender,
    commands: mpsc::Sender<StudentCommand>,
    status: watch::Receiver<Option<AttentionStatus>>,
    calibration: watch::Receiver<Option<f32>>,
    control: JoinHandle<()>,
}

impl SessionHandle {
    /// UI-facing current status (None until the first classification)
    pub fn status(&self) -> watch::Receiver<Option<AttentionStatus>> {
        self.status.clone()
    }

    /// UI-facing calibration result (None until calibration completes)
    pub fn calibration(&self) -> watch::Receiver<Option<f32>> {
        self.calibration.clone()
    }

    /// Engage a student-initiated status
    pub async fn set_manual(&self, status: AttentionStatus) -> bool {
        self.commands
            .send(StudentCommand::SetManual(status))
            .await
            .is_ok()
    }

    /// Return to automatic classification
    pub async fn resume(&self) -> bool {
        self.commands.send(StudentCommand::Resume).await.is_ok()
    }

    /// Wait for the session to end (session-finished signal)
    pub async fn finished(mut self) {
        let _ = (&mut self.control).await;
    }
}

/// Spawn the monitor and control tasks for one session
///
/// `sync` may be disconnected; classification and local state work
/// unchanged, publication is skipped.
pub fn spawn_session(
    settings: &Settings,
    sync: StatusSync,
    mut signals: mpsc::Receiver<SessionSignal>,
) -> SessionHandle {
    let queue = settings.frame_queue.max(1);
    let (frame_tx, mut frame_rx) = mpsc::channel::<LandmarkFrame>(queue);
    let (analysis_tx, mut analysis_rx) = mpsc::channel(queue);
    let (command_tx, mut command_rx) = mpsc::channel::<StudentCommand>(8);
    let (status_tx, status_rx) = watch::channel(None);
    let (calibration_tx, calibration_rx) = watch::channel(None);

    // Frame context: owns all smoothing/calibration/classifier state.
    // Strictly ordered per frame, no I/O.
    let mut monitor = AttentionMonitor::new(settings.attention.clone());
    tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            let analysis = monitor.process_frame(&frame);
            if analysis.status.is_none() && analysis.events.is_empty() {
                continue;
            }
            if analysis_tx.send(analysis).await.is_err() {
                // Control context is gone; the session is over
                break;
            }
        }
    });

    // Control context: ledger, UI-facing state, transport
    let control = tokio::spawn(async move {
        let mut ledger = StatusLedger::new();
        let mut signals_open = true;
        loop {
            tokio::select! {
                maybe = analysis_rx.recv() => {
                    let Some(analysis) = maybe else { break };
                    for event in &analysis.events {
                        let MonitorEvent::CalibrationComplete { ear_threshold } = event;
                        info!(ear_threshold, "Calibration finished");
                        let _ = calibration_tx.send(Some(*ear_threshold));
                    }
                    if let Some(status) = analysis.status {
                        if let Some(change) = ledger.observe(status) {
                            emit(&sync, &status_tx, change).await;
                        }
                    }
                }
                maybe = command_rx.recv() => {
                    let Some(command) = maybe else { break };
                    match command {
                        StudentCommand::SetManual(status) => {
                            if let Some(change) = ledger.set_manual(status) {
                                emit(&sync, &status_tx, change).await;
                            }
                        }
                        StudentCommand::Resume => ledger.resume(),
                    }
                }
                maybe = signals.recv(), if signals_open => {
                    match maybe {
                        Some(SessionSignal::SessionFinished) => {
                            info!("Session finished, tearing down pipeline");
                            break;
                        }
                        Some(SessionSignal::ModeChange { mode }) => {
                            info!(%mode, "Class mode changed");
                        }
                        // Transport gone; keep classifying locally
                        None => signals_open = false,
                    }
                }
            }
        }
    });

    SessionHandle {
        frames: FrameSender { tx: frame_tx },
        commands: command_tx,
        status: status_rx,
        calibration: calibration_rx,
        control,
    }
}

/// Update local state, then publish best-effort
async fn emit(
    sync: &StatusSync,
    status_tx: &watch::Sender<Option<AttentionStatus>>,
    status: AttentionStatus,
) {
    let _ = status_tx.send(Some(status));

    if !sync.is_connected() {
        return;
    }
    if let Err(e) = sync.publish_status(status).await {
        warn!("Status publish failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmark_feed::{mesh, Point3};
    use status_sync::SyncConfig;
    use std::time::Duration;

    const FRAME_MS: u64 = 33;

    fn face_frame(ts: u64, ear: f32) -> LandmarkFrame {
        let mut points = vec![Point3::default(); mesh::POINT_COUNT];
        points[mesh::LEFT_EYE_OUTER] = Point3::new(0.35, 0.40, 0.0);
        points[mesh::RIGHT_EYE_OUTER] = Point3::new(0.65, 0.40, 0.0);
        points[mesh::NOSE_TIP] = Point3::new(0.50, 0.55, 0.0);
        points[mesh::FOREHEAD] = Point3::new(0.50, 0.20, 0.0);
        points[mesh::CHIN] = Point3::new(0.50, 0.80, 0.0);
        points[mesh::MOUTH_LEFT] = Point3::new(0.42, 0.70, 0.0);
        points[mesh::MOUTH_RIGHT] = Point3::new(0.58, 0.70, 0.0);

        let gap = ear * 0.1;
        for (ring, x0) in [(&mesh::LEFT_EYE_EAR, 0.35), (&mesh::RIGHT_EYE_EAR, 0.55)] {
            points[ring[0]] = Point3::new(x0, 0.40, 0.0);
            points[ring[3]] = Point3::new(x0 + 0.1, 0.40, 0.0);
            points[ring[1]] = Point3::new(x0 + 0.03, 0.40 - gap / 2.0, 0.0);
            points[ring[2]] = Point3::new(x0 + 0.07, 0.40 - gap / 2.0, 0.0);
            points[ring[5]] = Point3::new(x0 + 0.03, 0.40 + gap / 2.0, 0.0);
            points[ring[4]] = Point3::new(x0 + 0.07, 0.40 + gap / 2.0, 0.0);
        }
        LandmarkFrame::new(points, Some(0.95), ts, (ts / FRAME_MS) as u32)
    }

    fn test_settings() -> Settings {
        Settings {
            frame_queue: 64,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_session_classifies_and_updates_status() {
        let (_signal_tx, signal_rx) = mpsc::channel(8);
        let sync = StatusSync::new(SyncConfig::default());
        let handle = spawn_session(&test_settings(), sync, signal_rx);

        let mut status = handle.status();
        let mut calibration = handle.calibration();

        // 30 calibration frames, then one classifiable frame
        for i in 0..31 {
            handle.frames.send(face_frame(i * FRAME_MS, 0.30));
        }

        tokio::time::timeout(Duration::from_secs(5), calibration.changed())
            .await
            .expect("calibration timed out")
            .expect("calibration channel closed");
        let threshold = calibration.borrow().expect("threshold set");
        assert!((threshold - 0.18).abs() < 1e-5);

        tokio::time::timeout(Duration::from_secs(5), status.changed())
            .await
            .expect("status timed out")
            .expect("status channel closed");
        assert_eq!(*status.borrow(), Some(AttentionStatus::Focus));
    }

    #[tokio::test]
    async fn test_manual_status_and_teardown() {
        let (signal_tx, signal_rx) = mpsc::channel(8);
        let sync = StatusSync::new(SyncConfig::default());
        let handle = spawn_session(&test_settings(), sync, signal_rx);

        let mut status = handle.status();
        assert!(handle.set_manual(AttentionStatus::Restroom).await);

        tokio::time::timeout(Duration::from_secs(5), status.changed())
            .await
            .expect("status timed out")
            .expect("status channel closed");
        assert_eq!(*status.borrow(), Some(AttentionStatus::Restroom));

        // Session-finished signal tears the pipeline down
        signal_tx
            .send(SessionSignal::SessionFinished)
            .await
            .expect("signal send");
        let frames = handle.frames.clone();
        tokio::time::timeout(Duration::from_secs(5), handle.finished())
            .await
            .expect("teardown timed out");

        // Sends after teardown are no-ops
        frames.send(face_frame(0, 0.30));
    }
}
