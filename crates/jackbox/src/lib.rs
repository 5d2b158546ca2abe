//! Top-level facade crate for the jackbox client.
//!
//! Re-exports the protocol core and the client library so users can depend on a single crate.

pub mod core {
    pub use jackbox_core::*;
}

pub mod client {
    pub use jackbox_client::*;
}
