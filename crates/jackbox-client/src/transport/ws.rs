//! Session loops.
//!
//! One session = one write loop + one read loop over a split connection,
//! joined by two bounded queues:
//! - outbound: pre-serialized text frames -> write loop -> transport
//! - inbound: transport -> read loop -> decoded sub-messages -> consumer
//!
//! Either loop ending closes the session; the other one follows. There is no
//! reconnect.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::Instrument;

use jackbox_core::error::{JackboxError, Result};
use jackbox_core::protocol::frame::PONG;
use jackbox_core::protocol::message::SubMessage;

use crate::transport::codec::{decode, Inbound};
use crate::transport::handshake::Transport;

/// Idempotent close flag shared by both loops.
#[derive(Debug, Default)]
pub struct CloseSignal {
    closed: AtomicBool,
    notify: Notify,
}

impl CloseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session closed. Returns true only for the first caller.
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Resolves once `close` has been called.
    pub async fn closed(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_closed() {
                return;
            }
            notified.await;
        }
    }
}

/// Going-away, abnormal closure, or a drop without a close handshake.
fn is_expected_closure(err: &WsError) -> bool {
    match err {
        WsError::ConnectionClosed | WsError::AlreadyClosed => true,
        WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => true,
        WsError::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
        _ => false,
    }
}

fn is_expected_close_code(code: CloseCode) -> bool {
    matches!(code, CloseCode::Away | CloseCode::Abnormal)
}

/// Drain the outbound queue into the transport, in order.
///
/// Exits when the queue closes, a write fails, or the session is closed
/// elsewhere. Always closes the session and the sink on the way out.
pub async fn write_loop<S>(mut rx: mpsc::Receiver<String>, mut sink: S, close: Arc<CloseSignal>)
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    loop {
        let frame = tokio::select! {
            biased;
            _ = close.closed() => break,
            next = rx.recv() => match next {
                Some(frame) => frame,
                None => break,
            },
        };

        tracing::debug!(%frame, "-> jackbox");
        if let Err(e) = sink.send(Message::text(frame)).await {
            tracing::debug!(error = %e, "websocket write failed");
            break;
        }
    }

    close.close();
    if let Err(e) = sink.close().await {
        tracing::trace!(error = %e, "websocket close after write loop");
    }
}

/// Read frames one at a time and feed them to the protocol layer.
///
/// Pings are answered through `out_tx`; decoded sub-messages go to
/// `inbound_tx` in arrival order, and are dropped when that queue is full.
/// Always closes the session on the way out.
pub async fn read_loop<R>(
    mut stream: R,
    out_tx: mpsc::Sender<String>,
    inbound_tx: mpsc::Sender<SubMessage>,
    close: Arc<CloseSignal>,
) where
    R: Stream<Item = std::result::Result<Message, WsError>> + Unpin,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = close.closed() => break,
            next = stream.next() => next,
        };

        let msg = match next {
            None => break,
            Some(Err(e)) => {
                if !is_expected_closure(&e) {
                    tracing::warn!(error = %e, "websocket read failed");
                }
                break;
            }
            Some(Ok(msg)) => msg,
        };

        let text = match msg {
            Message::Text(text) => text,
            Message::Close(frame) => {
                if let Some(f) = frame.filter(|f| !is_expected_close_code(f.code)) {
                    tracing::warn!(
                        code = u16::from(f.code),
                        reason = f.reason.as_str(),
                        "websocket closed by peer"
                    );
                }
                break;
            }
            // Binary, ping, pong: not part of this protocol.
            _ => continue,
        };

        match decode(text.as_str()) {
            Inbound::Hello | Inbound::Ignored => {}
            Inbound::Ping => {
                let sent = tokio::select! {
                    biased;
                    _ = close.closed() => break,
                    sent = out_tx.send(PONG.to_string()) => sent,
                };
                if sent.is_err() {
                    break;
                }
            }
            Inbound::Messages(msgs) => {
                // The consumer must never stall the reader.
                for msg in msgs {
                    match inbound_tx.try_send(msg) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::debug!("inbound queue full; dropping sub-message");
                        }
                        Err(TrySendError::Closed(_)) => {
                            tracing::debug!("inbound consumer gone; dropping sub-message");
                        }
                    }
                }
            }
        }
    }

    close.close();
}

/// A running session: the outbound queue, the inbound stream, and both loops.
pub struct Session {
    out_tx: mpsc::Sender<String>,
    inbound_rx: Option<mpsc::Receiver<SubMessage>>,
    close: Arc<CloseSignal>,
    write: JoinHandle<()>,
    read: JoinHandle<()>,
}

impl Session {
    /// Spawn both loops over a connected transport.
    pub fn start(transport: Transport, capacity: usize) -> Self {
        let (out_tx, out_rx) = mpsc::channel::<String>(capacity);
        let (inbound_tx, inbound_rx) = mpsc::channel::<SubMessage>(capacity);
        let close = Arc::new(CloseSignal::new());

        let span = tracing::Span::current();
        let write = tokio::spawn(
            write_loop(out_rx, transport.sink, Arc::clone(&close)).instrument(span.clone()),
        );
        let read = tokio::spawn(
            read_loop(transport.stream, out_tx.clone(), inbound_tx, Arc::clone(&close))
                .instrument(span),
        );

        Self {
            out_tx,
            inbound_rx: Some(inbound_rx),
            close,
            write,
            read,
        }
    }

    /// Enqueue one pre-serialized frame.
    pub async fn send(&self, frame: String) -> Result<()> {
        if self.close.is_closed() {
            return Err(JackboxError::Transient("session closed".into()));
        }
        self.out_tx
            .send(frame)
            .await
            .map_err(|_| JackboxError::Transient("outbound queue closed".into()))
    }

    /// Take the inbound sub-message stream. Only the first call gets it.
    pub fn take_inbound(&mut self) -> Option<mpsc::Receiver<SubMessage>> {
        self.inbound_rx.take()
    }

    pub fn is_closed(&self) -> bool {
        self.close.is_closed()
    }

    /// Close the session from the consumer side.
    pub fn close(&self) {
        self.close.close();
    }

    /// Wait until both loops have finished.
    pub async fn join(self) -> Result<()> {
        let Session {
            out_tx,
            inbound_rx,
            write,
            read,
            ..
        } = self;
        // Nothing else is sent once we are only waiting.
        drop(out_tx);
        drop(inbound_rx);

        let (w, r) = tokio::join!(write, read);
        w.map_err(|e| JackboxError::Fatal(format!("write loop: {e}")))?;
        r.map_err(|e| JackboxError::Fatal(format!("read loop: {e}")))?;
        Ok(())
    }
}
