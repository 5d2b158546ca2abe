//! Protocol modules (frame vocabulary + enveloped messages).
//!
//! Layering on top of the realtime transport:
//! - `frame`: literal prefixes that classify each text frame (hello, ping, envelope).
//! - `envelope`: the `{name,args}` JSON wrapper behind the `5:::` prefix.
//! - `message`: typed sub-messages found inside `args` (Action / Result / Event).
//!
//! All parsers are panic-free: malformed input is reported as `JackboxError`.

pub mod envelope;
pub mod frame;
pub mod message;
