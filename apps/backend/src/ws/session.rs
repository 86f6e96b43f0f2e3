use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::lobby::ConnectionId;
use crate::errors::domain::DomainError;
use crate::services::lobbies::LobbyService;
use crate::state::app_state::AppState;
use crate::ws::hub::{ConnectionRegistry, Outbound};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4().to_string();
    let session = WsSession::new(
        conn_id,
        app_state.lobbies.clone(),
        app_state.connections.clone(),
    );
    ws::start(session, &req, stream)
}

/// One websocket connection. Its id is also the player id.
pub struct WsSession {
    conn_id: ConnectionId,
    lobbies: Arc<LobbyService>,
    connections: Arc<ConnectionRegistry>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(
        conn_id: ConnectionId,
        lobbies: Arc<LobbyService>,
        connections: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            conn_id,
            lobbies,
            connections,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: &str) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.to_string(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Run a client command. Rejections are logged and otherwise ignored;
    /// every visible effect arrives through the registry as `Outbound`.
    fn dispatch(&self, cmd: ClientMsg) {
        let conn = self.conn_id.as_str();
        let result: Result<(), DomainError> = match cmd {
            ClientMsg::CreateLobby { display_name } => {
                self.lobbies.create_lobby(conn, &display_name).map(drop)
            }
            ClientMsg::JoinLobby { lobby_id, username } => {
                self.lobbies.join_lobby(conn, &lobby_id, &username).map(drop)
            }
            ClientMsg::StartGame => self.lobbies.start_game(conn),
            ClientMsg::PlayCard { card_id } => self.lobbies.play_card(conn, &card_id).map(drop),
            ClientMsg::LeaveLobby => self.lobbies.leave_lobby(conn).map(drop),
        };

        if let Err(err) = result {
            debug!(
                conn_id = %self.conn_id,
                reason = err.reason(),
                error = %err,
                "[WS SESSION] command ignored"
            );
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");

        let recipient = ctx.address().recipient::<Outbound>();
        self.connections.register(self.conn_id.clone(), recipient);

        Self::send_json(
            ctx,
            &ServerMsg::Connected {
                connection_id: self.conn_id.clone(),
            },
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.connections.unregister(&self.conn_id);
        let torn_down = self.lobbies.disconnect(&self.conn_id);
        info!(
            conn_id = %self.conn_id,
            lobby_id = ?torn_down,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
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

                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd),
                    Err(err) => {
                        debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] malformed frame");
                        Self::send_error(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::UnsupportedFrame, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
