//! Transport layer (WebSocket client).
//!
//! Exposes the handshake/connector, the frame codec that feeds the envelope
//! protocol, and the read/write loops of one session.

pub mod codec;
pub mod handshake;
pub mod ws;

pub use handshake::{Connector, Transport, WsConnector};
pub use ws::{CloseSignal, Session};
