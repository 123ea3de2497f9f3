use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::protocol::ServerMsg;

/// An outbound event delivered to one connection.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RoomMessage(pub ServerMsg);

/// Fan-out of room broadcasts to subscribed connections.
///
/// Keyed by trial id, then by connection id. Shared between the
/// socket actors (subscribe/unsubscribe) and the coordinators
/// (publish); all maps are concurrent, no lock ordering to respect.
#[derive(Default)]
pub struct TrialHub {
    rooms: DashMap<String, DashMap<Uuid, Recipient<RoomMessage>>>,
}

impl TrialHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, trial_id: &str, conn_id: Uuid, recipient: Recipient<RoomMessage>) {
        let room = self
            .rooms
            .entry(trial_id.to_string())
            .or_insert_with(DashMap::new);
        room.insert(conn_id, recipient);
    }

    pub fn unsubscribe(&self, trial_id: &str, conn_id: Uuid) {
        if let Some(room) = self.rooms.get(trial_id) {
            room.remove(&conn_id);
        }
        self.rooms.remove_if(trial_id, |_, room| room.is_empty());
    }

    pub fn publish(&self, trial_id: &str, msg: ServerMsg) {
        if let Some(room) = self.rooms.get(trial_id) {
            for recipient in room.iter() {
                recipient.value().do_send(RoomMessage(msg.clone()));
            }
        }
    }

    pub fn room_size(&self, trial_id: &str) -> usize {
        self.rooms.get(trial_id).map_or(0, |room| room.len())
    }
}
