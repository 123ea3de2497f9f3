use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::protocol::{ClientMsg, ServerMsg};
use crate::repos;
use crate::state::app_state::AppState;
use crate::ws::coordinator::Inbound;
use crate::ws::hub::RoomMessage;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = TrialSocket::new(Uuid::new_v4(), app_state);
    ws::start(session, &req, stream)
}

/// One actor per WebSocket connection.
///
/// Holds no trial state beyond room membership; every command is
/// forwarded to the trial's coordinator, which serializes processing.
pub struct TrialSocket {
    conn_id: Uuid,
    app_state: web::Data<AppState>,
    /// Trial room this connection joined, if any.
    joined_trial: Option<String>,
    last_heartbeat: Instant,
}

impl TrialSocket {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            joined_trial: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Validate the user and trial against storage, then subscribe the
    /// connection and hand the join to the coordinator.
    fn handle_join(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        username: String,
        trial_id: String,
    ) {
        let Some(db) = self.app_state.db.clone() else {
            Self::send_error(ctx, "Service unavailable.");
            return;
        };

        let lookup_db = db.clone();
        let lookup_username = username.clone();
        let lookup_trial_id = trial_id.clone();
        ctx.spawn(
            async move {
                let user = repos::users::find_by_username(&lookup_db, &lookup_username).await?;
                let trial = repos::trials::find_by_id(&lookup_db, &lookup_trial_id).await?;
                Ok::<_, crate::errors::domain::DomainError>(user.zip(trial))
            }
            .into_actor(self)
            .map(move |res, actor, ctx| match res {
                Ok(Some((_user, trial))) => {
                    let recipient = ctx.address().recipient::<RoomMessage>();
                    let hub = actor.app_state.hub.clone();
                    hub.subscribe(&trial_id, actor.conn_id, recipient.clone());
                    actor.joined_trial = Some(trial_id.clone());

                    let addr = actor.app_state.registry.get_or_spawn(
                        &trial,
                        hub,
                        Some(db),
                        actor.app_state.policy.clone(),
                    );
                    addr.do_send(Inbound {
                        reply: recipient,
                        cmd: ClientMsg::JoinTrial { username, trial_id },
                    });
                }
                Ok(None) => Self::send_error(ctx, "Invalid user or trial."),
                Err(err) => {
                    warn!(error = %err, "join lookup failed");
                    Self::send_error(ctx, err.client_message());
                }
            }),
        );
    }

    /// Route any post-join command to its trial's coordinator.
    fn forward(&self, ctx: &mut ws::WebsocketContext<Self>, cmd: ClientMsg) {
        match self.app_state.registry.get(cmd.trial_id()) {
            Some(addr) => addr.do_send(Inbound {
                reply: ctx.address().recipient(),
                cmd,
            }),
            None => Self::send_error(ctx, "Trial not found."),
        }
    }
}

impl Actor for TrialSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "trial socket connected");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(trial_id) = &self.joined_trial {
            self.app_state.hub.unsubscribe(trial_id, self.conn_id);
        }
        info!(conn_id = %self.conn_id, "trial socket disconnected");
    }
}

/// Coordinator events fanned out to this connection.
impl Handler<RoomMessage> for TrialSocket {
    type Result = ();

    fn handle(&mut self, msg: RoomMessage, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TrialSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                let cmd: ClientMsg = match serde_json::from_str(&text) {
                    Ok(cmd) => cmd,
                    Err(_) => {
                        Self::send_error(ctx, "Malformed message.");
                        return;
                    }
                };
                match cmd {
                    ClientMsg::JoinTrial { username, trial_id } => {
                        self.handle_join(ctx, username, trial_id);
                    }
                    other => self.forward(ctx, other),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "Binary not supported.");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.stop();
            }
        }
    }
}
