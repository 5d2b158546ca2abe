//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use jackbox_core::error::{JackboxError, Result};

pub use schema::{ClientConfig, ClientSection, ServiceSection, SessionSection};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| JackboxError::NotFound(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| JackboxError::Malformed(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
