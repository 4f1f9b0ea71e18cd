//! # Telemetry Channel
//!
//! Owns the connection to the byte-stream provider and publishes
//! decoded frames to any number of subscribers.
//!
//! Frames travel over a `tokio::sync::watch` channel: each new frame
//! overwrites the previous one for all current subscribers, and a
//! subscriber attaching mid-stream only ever observes the current
//! value. Connection state and transport errors travel over a second
//! watch channel, kept separate from frame data.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bep::decoder::decode_packet;
use crate::bep::detector::FrameDetector;
use crate::bep::protocol::TelemetryFrame;
use crate::config::SerialConfig;
use crate::error::{BepLinkError, Result};
use crate::serial::{BepSerial, ByteSource};

/// Read buffer size when no configuration is supplied
const DEFAULT_READ_CHUNK_BYTES: usize = 256;

/// Connection state as seen by consumers
#[derive(Debug, Clone, Default)]
pub struct LinkStatus {
    /// A session task is bringing the port up
    pub connecting: bool,

    /// The byte stream is open and being scanned for frames
    pub opened: bool,

    /// Most recent transport or open failure, if any
    ///
    /// A clean close (device unplugged, explicit disconnect) is a
    /// lifecycle transition and leaves this untouched.
    pub last_error: Option<Arc<BepLinkError>>,
}

/// Handle binding a byte-stream connection to frame subscribers
///
/// One channel instance survives across connect/disconnect cycles;
/// subscribers keep their receivers across reconnects. The frame
/// detector lives inside the session task and is dropped with it, so
/// no partial frame bytes can ever cross from one session into the
/// next.
pub struct TelemetryChannel {
    frame_tx: Arc<watch::Sender<Option<TelemetryFrame>>>,
    status_tx: Arc<watch::Sender<LinkStatus>>,
    session: Option<Session>,
}

struct Session {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TelemetryChannel {
    /// Create a channel with no active connection and no frame
    pub fn new() -> Self {
        let (frame_tx, _) = watch::channel(None);
        let (status_tx, _) = watch::channel(LinkStatus::default());
        Self {
            frame_tx: Arc::new(frame_tx),
            status_tx: Arc::new(status_tx),
            session: None,
        }
    }

    /// Subscribe to decoded frames (latest value only)
    ///
    /// `None` means no frame has been decoded on the current session.
    pub fn frames(&self) -> watch::Receiver<Option<TelemetryFrame>> {
        self.frame_tx.subscribe()
    }

    /// Subscribe to connection state updates
    pub fn status(&self) -> watch::Receiver<LinkStatus> {
        self.status_tx.subscribe()
    }

    /// True while the byte stream is open
    pub fn is_opened(&self) -> bool {
        self.status_tx.borrow().opened
    }

    /// True while a session task is bringing the port up
    pub fn is_connecting(&self) -> bool {
        self.status_tx.borrow().connecting
    }

    /// Open the configured serial port and start decoding
    ///
    /// Non-blocking: the port is opened inside the spawned session
    /// task, and open failures surface through [`LinkStatus`]. Any
    /// frame left over from a previous session is cleared before the
    /// new session can publish.
    ///
    /// # Errors
    ///
    /// Returns [`BepLinkError::AlreadyConnected`] if a session is
    /// still live; call [`disconnect`](Self::disconnect) first.
    pub fn connect(&mut self, config: &SerialConfig) -> Result<()> {
        self.ensure_idle()?;

        self.frame_tx.send_replace(None);
        self.status_tx.send_replace(LinkStatus {
            connecting: true,
            opened: false,
            last_error: None,
        });

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_serial_session(
            config.clone(),
            Arc::clone(&self.frame_tx),
            Arc::clone(&self.status_tx),
            cancel.clone(),
        ));
        self.session = Some(Session { cancel, task });
        Ok(())
    }

    /// Start decoding from an already-open byte source
    ///
    /// Used for scripted and replayed streams; the status moves
    /// straight to opened.
    ///
    /// # Errors
    ///
    /// Returns [`BepLinkError::AlreadyConnected`] if a session is
    /// still live.
    pub fn connect_with_source<S>(&mut self, source: S) -> Result<()>
    where
        S: ByteSource + 'static,
    {
        self.ensure_idle()?;

        self.frame_tx.send_replace(None);
        self.status_tx.send_replace(LinkStatus {
            connecting: false,
            opened: true,
            last_error: None,
        });

        let cancel = CancellationToken::new();
        let frame_tx = Arc::clone(&self.frame_tx);
        let status_tx = Arc::clone(&self.status_tx);
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            read_loop(source, DEFAULT_READ_CHUNK_BYTES, frame_tx, status_tx, task_cancel).await;
        });
        self.session = Some(Session { cancel, task });
        Ok(())
    }

    /// Tear down the active session, if any
    ///
    /// Cancels the session task and waits for it to finish, so by the
    /// time this returns no handler is attached to the old stream and
    /// a new [`connect`](Self::connect) is accepted. The published
    /// frame resets to `None`.
    pub async fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel.cancel();
            if let Err(e) = session.task.await {
                warn!("Session task ended abnormally: {}", e);
            }
        }

        self.frame_tx.send_replace(None);
        self.status_tx.send_modify(|status| {
            status.connecting = false;
            status.opened = false;
        });
        debug!("Telemetry channel disconnected");
    }

    /// Fail unless no session is running (finished tasks are reaped)
    fn ensure_idle(&mut self) -> Result<()> {
        let live = self.session.as_ref().is_some_and(|s| !s.task.is_finished());
        if live {
            return Err(BepLinkError::AlreadyConnected);
        }
        self.session = None;
        Ok(())
    }
}

impl Default for TelemetryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TelemetryChannel {
    fn drop(&mut self) {
        if let Some(session) = &self.session {
            session.cancel.cancel();
        }
    }
}

/// Session body for a real serial connection: open, then decode
async fn run_serial_session(
    config: SerialConfig,
    frame_tx: Arc<watch::Sender<Option<TelemetryFrame>>>,
    status_tx: Arc<watch::Sender<LinkStatus>>,
    cancel: CancellationToken,
) {
    let serial = match BepSerial::open(&config) {
        Ok(serial) => serial,
        Err(e) => {
            warn!("Connect failed: {}", e);
            status_tx.send_replace(LinkStatus {
                connecting: false,
                opened: false,
                last_error: Some(Arc::new(e)),
            });
            return;
        }
    };

    info!("Serial link opened at {}", serial.device_path());
    status_tx.send_modify(|status| {
        status.connecting = false;
        status.opened = true;
    });

    read_loop(serial, config.read_chunk_bytes, frame_tx, status_tx, cancel).await;
}

/// Pump the byte stream through the frame detector until the stream
/// ends, errors, or the session is cancelled
///
/// All detector state lives here, mutated only between awaits on this
/// task, so chunks are processed atomically with respect to each
/// other. Decoding is synchronous in the same turn that completes a
/// frame; publication is a watch overwrite.
async fn read_loop<S: ByteSource>(
    mut source: S,
    chunk_bytes: usize,
    frame_tx: Arc<watch::Sender<Option<TelemetryFrame>>>,
    status_tx: Arc<watch::Sender<LinkStatus>>,
    cancel: CancellationToken,
) {
    let mut detector = FrameDetector::new();
    let mut buf = vec![0u8; chunk_bytes];
    let mut frame_count: u64 = 0;

    loop {
        let read = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Read loop cancelled after {} frames", frame_count);
                break;
            }
            read = source.read_chunk(&mut buf) => read,
        };

        match read {
            Ok(0) => {
                info!("Byte stream closed after {} frames", frame_count);
                break;
            }
            Ok(n) => {
                for packet in detector.push_chunk(&buf[..n]) {
                    let frame = decode_packet(&packet);
                    frame_count += 1;
                    frame_tx.send_replace(Some(frame));
                }
            }
            Err(e) => {
                warn!("Transport error: {}", e);
                status_tx.send_modify(|status| {
                    status.last_error =
                        Some(Arc::new(BepLinkError::Transport(e.to_string())));
                });
                break;
            }
        }
    }

    status_tx.send_modify(|status| {
        status.connecting = false;
        status.opened = false;
    });
}
