//! jackbox core: transport-agnostic protocol primitives, data model, and errors.
//!
//! This crate defines the wire-level contracts shared by the client runtime
//! and its tests: frame classification, the `{name,args}` envelope, and the
//! typed sub-messages carried inside it. It intentionally carries no transport
//! or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed frames coming off the wire surface as `JackboxError`, never as a
//! crashed read loop.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{JackboxError, Result};
