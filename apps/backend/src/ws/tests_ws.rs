use std::sync::Arc;

use actix::prelude::*;
use time::OffsetDateTime;

use crate::domain::{Scripted, TrialPhase};
use crate::protocol::{ClientMsg, ServerMsg};
use crate::repos::trials::Trial;
use crate::ws::coordinator::{Inbound, OpponentReady, TrialCoordinator};
use crate::ws::hub::{RoomMessage, TrialHub};
use crate::ws::registry::TrialRegistry;

/// Collects everything delivered to one connection.
struct Recorder {
    received: Vec<ServerMsg>,
}

impl Recorder {
    fn start_new() -> Addr<Self> {
        Self {
            received: Vec::new(),
        }
        .start()
    }
}

impl Actor for Recorder {
    type Context = Context<Self>;
}

impl Handler<RoomMessage> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: RoomMessage, _ctx: &mut Self::Context) {
        self.received.push(msg.0);
    }
}

#[derive(Message)]
#[rtype(result = "Vec<ServerMsg>")]
struct Drain;

impl Handler<Drain> for Recorder {
    type Result = MessageResult<Drain>;

    fn handle(&mut self, _msg: Drain, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(std::mem::take(&mut self.received))
    }
}

fn trial_row() -> Trial {
    Trial {
        trial_id: "trial-1".to_string(),
        title: "alice v. bob".to_string(),
        description: "The case of the missing teapot".to_string(),
        plaintiff_id: "alice".to_string(),
        defendant_id: "bob".to_string(),
        current_phase: TrialPhase::PreTrial,
        current_turn_username: None,
        created_at: OffsetDateTime::now_utc(),
        motion_to_judgment_called: false,
    }
}

fn spawn_coordinator(hub: Arc<TrialHub>) -> Addr<TrialCoordinator> {
    TrialCoordinator::new(&trial_row(), hub, None, Arc::new(Scripted::new(&[0]))).start()
}

fn join_cmd(username: &str) -> ClientMsg {
    ClientMsg::JoinTrial {
        username: username.to_string(),
        trial_id: "trial-1".to_string(),
    }
}

#[actix_rt::test]
async fn hub_publishes_to_subscribers_only() {
    let hub = TrialHub::new();
    let recorder = Recorder::start_new();
    let conn_id = uuid::Uuid::new_v4();

    hub.subscribe("trial-1", conn_id, recorder.clone().recipient());
    hub.publish(
        "trial-1",
        ServerMsg::UserReady {
            username: "alice".to_string(),
        },
    );
    hub.publish(
        "trial-2",
        ServerMsg::UserReady {
            username: "bob".to_string(),
        },
    );

    let received = recorder.send(Drain).await.unwrap();
    assert_eq!(
        received,
        vec![ServerMsg::UserReady {
            username: "alice".to_string(),
        }]
    );

    hub.unsubscribe("trial-1", conn_id);
    assert_eq!(hub.room_size("trial-1"), 0);
}

#[actix_rt::test]
async fn registry_reuses_the_live_coordinator() {
    let registry = TrialRegistry::new();
    let hub = Arc::new(TrialHub::new());
    let trial = trial_row();

    let first = registry.get_or_spawn(&trial, hub.clone(), None, Arc::new(Scripted::new(&[0])));
    let second = registry.get_or_spawn(&trial, hub, None, Arc::new(Scripted::new(&[0])));
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("trial-1"), Some(first));
    assert_eq!(registry.get("trial-9"), None);
}

#[actix_rt::test]
async fn coordinator_routes_room_and_caller_events() {
    let hub = Arc::new(TrialHub::new());
    let room_recorder = Recorder::start_new();
    hub.subscribe(
        "trial-1",
        uuid::Uuid::new_v4(),
        room_recorder.clone().recipient(),
    );

    let caller = Recorder::start_new();
    let coordinator = spawn_coordinator(hub);

    coordinator
        .send(Inbound {
            reply: caller.clone().recipient(),
            cmd: join_cmd("alice"),
        })
        .await
        .unwrap();

    let room = room_recorder.send(Drain).await.unwrap();
    assert_eq!(
        room,
        vec![ServerMsg::JoinedTrial {
            message: "alice has joined the trial.".to_string(),
        }]
    );
    let direct = caller.send(Drain).await.unwrap();
    assert_eq!(
        direct,
        vec![ServerMsg::TrialState {
            current_phase: TrialPhase::PreTrial,
            current_turn: None,
        }]
    );
}

#[actix_rt::test]
async fn coordinator_reports_errors_to_caller_only() {
    let hub = Arc::new(TrialHub::new());
    let room_recorder = Recorder::start_new();
    hub.subscribe(
        "trial-1",
        uuid::Uuid::new_v4(),
        room_recorder.clone().recipient(),
    );

    let caller = Recorder::start_new();
    let coordinator = spawn_coordinator(hub);

    // Nobody holds the turn during pre-trial.
    coordinator
        .send(Inbound {
            reply: caller.clone().recipient(),
            cmd: ClientMsg::SubmitAction {
                username: "alice".to_string(),
                trial_id: "trial-1".to_string(),
                action_type: "opening_statement".to_string(),
                content: String::new(),
                witness_name: None,
                evidence_description: None,
            },
        })
        .await
        .unwrap();

    let direct = caller.send(Drain).await.unwrap();
    assert_eq!(
        direct,
        vec![ServerMsg::Error {
            message: "Not your turn.".to_string(),
        }]
    );
    assert!(room_recorder.send(Drain).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn coordinator_answers_opponent_ready_checks() {
    let hub = Arc::new(TrialHub::new());
    let caller = Recorder::start_new();
    let coordinator = spawn_coordinator(hub);

    coordinator
        .send(Inbound {
            reply: caller.clone().recipient(),
            cmd: ClientMsg::ReadyForNextPhase {
                username: "bob".to_string(),
                trial_id: "trial-1".to_string(),
            },
        })
        .await
        .unwrap();

    let ready = coordinator
        .send(OpponentReady {
            username: "alice".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ready, Ok(true));

    let outsider = coordinator
        .send(OpponentReady {
            username: "mallory".to_string(),
        })
        .await
        .unwrap();
    assert!(outsider.is_err());
}
