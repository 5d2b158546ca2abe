//! jackbox client library entry.
//!
//! This crate wires the room resolver, the drawing loader, the transport
//! (handshake + session loops), and the orchestrator into one client. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod client;
pub mod config;
pub mod drawing;
pub mod http;
pub mod resolver;
pub mod transport;

pub use client::JackboxClient;
