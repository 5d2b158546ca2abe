//! Client orchestrator: one identity, one room, one session.
//!
//! `join_room` resolves the room, performs the handshake, starts the session
//! loops and enqueues the join action. Further actions (the player picture)
//! go through the same outbound queue. `wait` is the final join point.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::Instrument;

use jackbox_core::error::{JackboxError, Result};
use jackbox_core::model::{RoomInfo, UserId};
use jackbox_core::protocol::envelope::Envelope;
use jackbox_core::protocol::message::{
    JoinRoom, SendMessageToRoomOwner, SetPlayerPicture, SubMessage,
};

use crate::drawing::load_drawing;
use crate::resolver::RoomResolver;
use crate::transport::{Connector, Session};

pub struct JackboxClient {
    user_id: UserId,
    resolver: Arc<dyn RoomResolver>,
    connector: Arc<dyn Connector>,
    queue_capacity: usize,
    room: Option<RoomInfo>,
    session: Option<Session>,
}

impl JackboxClient {
    /// Create a client with a freshly generated user id.
    pub fn new(
        resolver: Arc<dyn RoomResolver>,
        connector: Arc<dyn Connector>,
        queue_capacity: usize,
    ) -> Self {
        Self {
            user_id: UserId::generate(),
            resolver,
            connector,
            queue_capacity,
            room: None,
            session: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn room(&self) -> Option<&RoomInfo> {
        self.room.as_ref()
    }

    /// Resolve `room_code`, connect, and join as `name`.
    ///
    /// A failed lookup returns before any connection is attempted.
    pub async fn join_room(&mut self, name: &str, room_code: &str) -> Result<()> {
        if self.session.is_some() {
            return Err(JackboxError::Fatal("client already joined a room".into()));
        }

        let span = tracing::info_span!("session", room = %room_code, user = %self.user_id);
        async {
            let room = self.resolver.resolve(room_code, &self.user_id).await?;
            let join = Envelope::single(&JoinRoom::new(&room, &self.user_id, name))?.encode()?;

            let transport = self.connector.connect().await?;
            let session = Session::start(transport, self.queue_capacity);
            session.send(join).await?;

            tracing::info!(%name, "join requested");
            self.room = Some(room);
            self.session = Some(session);
            Ok::<(), JackboxError>(())
        }
        .instrument(span)
        .await
    }

    /// Wrap `message` in a `SendMessageToRoomOwner` action and enqueue it.
    pub async fn send_to_room_owner<T: Serialize>(&self, message: &T) -> Result<()> {
        let (room, session) = self.joined()?;
        let action = SendMessageToRoomOwner::new(room, &self.user_id, message)?;
        session.send(Envelope::single(&action)?.encode()?).await
    }

    /// Load the drawing at `path` and send it as this player's picture.
    pub async fn set_player_picture(&self, path: impl AsRef<Path>) -> Result<()> {
        self.joined()?;
        let lines = load_drawing(path).await?;
        let strokes = lines.len();
        self.send_to_room_owner(&SetPlayerPicture::new(lines)).await?;
        tracing::info!(strokes, "player picture sent");
        Ok(())
    }

    /// Inbound sub-messages of the running session. Only the first call gets
    /// the receiver; if nobody takes it, inbound messages are dropped at `wait`.
    pub fn take_inbound(&mut self) -> Option<mpsc::Receiver<SubMessage>> {
        self.session.as_mut().and_then(Session::take_inbound)
    }

    /// Block until both session loops have terminated.
    pub async fn wait(self) -> Result<()> {
        match self.session {
            Some(session) => session.join().await,
            None => Err(JackboxError::Fatal("client not initialized".into())),
        }
    }

    fn joined(&self) -> Result<(&RoomInfo, &Session)> {
        match (&self.room, &self.session) {
            (Some(room), Some(session)) => Ok((room, session)),
            _ => Err(JackboxError::Fatal(
                "client not initialized: join a room first".into(),
            )),
        }
    }
}
