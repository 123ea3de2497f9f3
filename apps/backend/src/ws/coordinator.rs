//! One actor per live trial.
//!
//! The coordinator's mailbox is the trial's command queue: commands
//! are processed strictly one at a time, in arrival order, against the
//! in-memory [`TrialFlow`]. Storage writes are mirrored asynchronously
//! after the state change and never block or fail a command.

use std::sync::Arc;

use actix::prelude::*;
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

use crate::domain::DecisionPolicy;
use crate::errors::domain::DomainError;
use crate::protocol::{ClientMsg, ServerMsg};
use crate::repos;
use crate::repos::trials::Trial;
use crate::services::trial_flow::{ActionSubmission, Emit, Outcome, PersistCmd, TrialFlow};
use crate::ws::hub::{RoomMessage, TrialHub};

/// A client command forwarded from a socket actor.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Inbound {
    /// Reply channel for caller-only events and errors.
    pub reply: Recipient<RoomMessage>,
    pub cmd: ClientMsg,
}

/// Readiness check served from coordinator state, for the HTTP side.
#[derive(Message)]
#[rtype(result = "Result<bool, DomainError>")]
pub struct OpponentReady {
    pub username: String,
}

pub struct TrialCoordinator {
    flow: TrialFlow,
    hub: Arc<TrialHub>,
    db: Option<DatabaseConnection>,
}

impl TrialCoordinator {
    pub fn new(
        trial: &Trial,
        hub: Arc<TrialHub>,
        db: Option<DatabaseConnection>,
        policy: Arc<dyn DecisionPolicy>,
    ) -> Self {
        Self {
            flow: TrialFlow::from_trial(trial, policy),
            hub,
            db,
        }
    }

    fn dispatch(&self, outcome: Outcome, reply: &Recipient<RoomMessage>) {
        for emit in outcome.events {
            match emit {
                Emit::Room(msg) => self.hub.publish(self.flow.trial_id(), msg),
                Emit::Caller(msg) => reply.do_send(RoomMessage(msg)),
            }
        }

        if outcome.persist.is_empty() {
            return;
        }
        match &self.db {
            Some(db) => {
                let db = db.clone();
                let trial_id = self.flow.trial_id().to_string();
                actix::spawn(persist_all(db, trial_id, outcome.persist));
            }
            None => {
                debug!(
                    trial_id = self.flow.trial_id(),
                    count = outcome.persist.len(),
                    "no database configured; dropping storage writes"
                );
            }
        }
    }
}

impl Actor for TrialCoordinator {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        debug!(trial_id = self.flow.trial_id(), "trial coordinator started");
    }
}

impl Handler<Inbound> for TrialCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Inbound, _ctx: &mut Self::Context) {
        let result = match msg.cmd {
            ClientMsg::JoinTrial { username, .. } => Ok(self.flow.join(&username)),
            ClientMsg::SubmitEvidence {
                username,
                description,
                ..
            } => Ok(self.flow.submit_evidence(&username, &description)),
            ClientMsg::SubmitWitness {
                username,
                witness_name,
                ..
            } => Ok(self.flow.submit_witness(&username, &witness_name)),
            ClientMsg::ReadyForNextPhase { username, .. } => self.flow.set_ready(&username),
            ClientMsg::SubmitAction {
                username,
                action_type,
                content,
                witness_name,
                evidence_description,
                ..
            } => self.flow.submit_action(
                &username,
                &ActionSubmission {
                    action_type,
                    content,
                    witness_name,
                    evidence_description,
                },
            ),
            ClientMsg::SubmitQuestion {
                username, question, ..
            } => self.flow.submit_question(&username, &question),
            ClientMsg::Object {
                username, reason, ..
            } => self.flow.raise_objection(&username, &reason),
        };

        match result {
            Ok(outcome) => self.dispatch(outcome, &msg.reply),
            Err(err) => {
                debug!(
                    trial_id = self.flow.trial_id(),
                    error = %err,
                    "command rejected"
                );
                msg.reply.do_send(RoomMessage(ServerMsg::Error {
                    message: err.client_message(),
                }));
            }
        }
    }
}

impl Handler<OpponentReady> for TrialCoordinator {
    type Result = Result<bool, DomainError>;

    fn handle(&mut self, msg: OpponentReady, _ctx: &mut Self::Context) -> Self::Result {
        self.flow.opponent_ready(&msg.username)
    }
}

/// Mirror queued writes to storage, in order. Failures are logged;
/// the in-memory state already moved on.
async fn persist_all(db: DatabaseConnection, trial_id: String, cmds: Vec<PersistCmd>) {
    for cmd in cmds {
        let result = match cmd {
            PersistCmd::Transcript(entry) => repos::transcripts::append(&db, &entry).await,
            PersistCmd::Evidence(item) => repos::evidence::create(&db, &item).await,
            PersistCmd::Witness(item) => repos::witnesses::create(&db, &item).await,
            PersistCmd::Progress { phase, turn } => {
                repos::trials::update_progress(&db, &trial_id, phase, turn).await
            }
        };
        if let Err(err) = result {
            warn!(trial_id, error = %err, "storage write failed");
        }
    }
}
