//! jackbox client binary.
//!
//! Loads `jackbox.yaml` (or the path given as the first argument), joins the
//! configured room, optionally pushes a picture to the room owner, then logs
//! inbound messages until the session ends.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use jackbox_client::resolver::HttpRoomResolver;
use jackbox_client::transport::WsConnector;
use jackbox_client::{config, http, JackboxClient};
use jackbox_core::error::Result;
use jackbox_core::protocol::message::SubMessage;

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "jackbox.yaml".to_string());
    if let Err(e) = run(&path).await {
        tracing::error!(kind = e.kind().as_str(), error = %e, "client aborted");
        std::process::exit(1);
    }
}

async fn run(path: &str) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let http = http::build_client(&cfg.session)?;

    let resolver = Arc::new(HttpRoomResolver::new(http.clone(), &cfg.service));
    let connector = Arc::new(WsConnector::new(http, &cfg.service, &cfg.session));
    let mut client = JackboxClient::new(resolver, connector, cfg.session.queue_capacity);

    tracing::info!(
        room = %cfg.client.room_code,
        user = %client.user_id(),
        "jackbox client starting"
    );
    client.join_room(&cfg.client.name, &cfg.client.room_code).await?;

    if let Some(mut inbound) = client.take_inbound() {
        tokio::spawn(async move {
            while let Some(msg) = inbound.recv().await {
                log_message(&msg);
            }
        });
    }

    if let Some(picture) = &cfg.client.picture {
        client.set_player_picture(picture).await?;
    }

    client.wait().await?;
    tracing::info!("session ended");
    Ok(())
}

fn log_message(msg: &SubMessage) {
    match msg {
        SubMessage::Action(a) => {
            tracing::debug!(action = %a.header.action, user = %a.header.user_id, "<- action");
        }
        SubMessage::Result(r) => {
            tracing::info!(
                action = %r.action,
                success = r.success,
                join_type = %r.join_type,
                "<- result"
            );
        }
        SubMessage::Event(e) => {
            tracing::info!(event = %e.event, keys = e.blob.len(), "<- event");
        }
        SubMessage::Unknown(kind) => {
            tracing::trace!(%kind, "<- unknown");
        }
    }
}
