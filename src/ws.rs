//! WebSocket Handler
//!
//! One connection drives one builder session. Messages are applied in
//! arrival order by [`apply_client_message`]; the socket loop itself
//! only does transport. There is no broadcast fan-out: multi-user sync
//! is out of scope.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use maquette_canvas::element::Element;
use maquette_canvas::error::Error;
use maquette_canvas::protocol::{ClientMessage, ServerMessage};
use maquette_canvas::{catalog, geometry, ResizeSession};
use maquette_llm::FailureCategory;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::export::generate_export;
use crate::server::AppState;

/// WebSocket upgrade handler
pub async fn canvas_ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    info!(session_id = %session_id, "WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

/// Handle a WebSocket connection
async fn handle_socket(mut socket: WebSocket, session_id: Uuid, state: Arc<AppState>) {
    let session = state.sessions.ensure_session(session_id).await;
    let welcome = ServerMessage::welcome(session.id, session.canvas.elements().to_vec());
    if send(&mut socket, &welcome).await.is_err() {
        return;
    }
    info!(session_id = %session_id, "WebSocket connected");

    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Text(text)) => {
                debug!(len = text.len(), "received message");
                let replies = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        match apply_client_message(&state, session_id, client_msg).await {
                            Ok(replies) => replies,
                            Err(error) => {
                                vec![ServerMessage::error(error.code(), error.to_string())]
                            }
                        }
                    }
                    Err(error) => {
                        let error = Error::invalid_message(error.to_string());
                        vec![ServerMessage::error(error.code(), error.to_string())]
                    }
                };
                for reply in &replies {
                    if send(&mut socket, reply).await.is_err() {
                        return;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                info!(session_id = %session_id, "WebSocket closed by client");
                break;
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Err(error) => {
                warn!(%error, "WebSocket error");
                break;
            }
            _ => {}
        }
    }
    info!(session_id = %session_id, "WebSocket disconnected");
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).unwrap_or_else(|_| {
        r#"{"type":"error","code":"serialization_error","message":"reply serialization failed"}"#
            .to_string()
    });
    socket.send(Message::Text(json)).await
}

/// Apply one client message to the session and produce the replies.
///
/// Mutations referencing missing elements are no-ops (empty reply list),
/// matching the canvas model's idempotency contract.
pub async fn apply_client_message(
    state: &AppState,
    session_id: Uuid,
    message: ClientMessage,
) -> Result<Vec<ServerMessage>, Error> {
    match message {
        ClientMessage::Ping => Ok(vec![ServerMessage::Pong]),

        ClientMessage::DropElement {
            kind,
            pointer,
            viewport,
        } => {
            let Some(entry) = catalog::entry(kind) else {
                return Err(Error::invalid_message(format!(
                    "kind {kind} is not in the catalog"
                )));
            };
            let position = geometry::drop_position(pointer, viewport);
            let (element, elements) = with_session(state, session_id, move |session| {
                let id = session.canvas.add_element(entry, position);
                (
                    session.canvas.get(id).cloned(),
                    session.canvas.elements().to_vec(),
                )
            })
            .await?;

            let mut replies = Vec::new();
            if let Some(element) = element {
                replies.push(ServerMessage::ElementAdded { element });
            }
            // full sync covers locked-overlap demotions
            replies.push(ServerMessage::CanvasState { elements });
            Ok(replies)
        }

        ClientMessage::MoveElement {
            id,
            pointer,
            viewport,
        } => {
            let position = geometry::drop_position(pointer, viewport);
            let elements = with_session(state, session_id, move |session| {
                if session.canvas.move_element(id, position) {
                    Some(session.canvas.elements().to_vec())
                } else {
                    None
                }
            })
            .await?;
            Ok(elements
                .map(|elements| vec![ServerMessage::CanvasState { elements }])
                .unwrap_or_default())
        }

        ClientMessage::SelectElement { id } => {
            let selected = with_session(state, session_id, move |session| {
                session.select_element(id);
                session.canvas.selected()
            })
            .await?;
            Ok(vec![ServerMessage::SelectionChanged { id: selected }])
        }

        ClientMessage::UpdateElement { id, update } => {
            let element = with_session(state, session_id, move |session| {
                if session.canvas.update_element(id, update) {
                    session.canvas.get(id).cloned()
                } else {
                    None
                }
            })
            .await?;
            Ok(updated_reply(element))
        }

        ClientMessage::SetProperty { key, value } => {
            let element = with_session(state, session_id, move |session| {
                let (id, update) = session.editor.set_prop(key, value).ok_or(Error::NoSelection)?;
                session.canvas.update_element(id, update);
                Ok::<_, Error>(session.canvas.get(id).cloned())
            })
            .await??;
            Ok(updated_reply(element))
        }

        ClientMessage::SetStyle { key, value } => {
            let element = with_session(state, session_id, move |session| {
                let (id, update) = session.editor.set_style(key, value).ok_or(Error::NoSelection)?;
                session.canvas.update_element(id, update);
                Ok::<_, Error>(session.canvas.get(id).cloned())
            })
            .await??;
            Ok(updated_reply(element))
        }

        ClientMessage::ToggleLock { id } => {
            let element = with_session(state, session_id, move |session| {
                if session.canvas.toggle_lock(id) {
                    session.canvas.get(id).cloned()
                } else {
                    None
                }
            })
            .await?;
            Ok(updated_reply(element))
        }

        ClientMessage::DeleteElement { id } => {
            let deleted = with_session(state, session_id, move |session| {
                session.canvas.delete_element(id)
            })
            .await?;
            Ok(if deleted {
                vec![ServerMessage::ElementDeleted { id }]
            } else {
                Vec::new()
            })
        }

        ClientMessage::ClearCanvas { confirmed } => {
            if !confirmed {
                // declining the dialog leaves state untouched
                return Ok(Vec::new());
            }
            with_session(state, session_id, |session| session.canvas.clear()).await?;
            Ok(vec![ServerMessage::CanvasCleared])
        }

        ClientMessage::ResizeStart {
            id,
            handle,
            pointer,
        } => {
            with_session(state, session_id, move |session| {
                let resize = {
                    let element = session.canvas.get(id).ok_or(Error::ElementNotFound(id))?;
                    ResizeSession::begin(element, handle, pointer)?
                };
                session.resize = Some(resize);
                Ok::<_, Error>(())
            })
            .await??;
            Ok(Vec::new())
        }

        ClientMessage::ResizeMove { pointer } => {
            let element = with_session(state, session_id, move |session| {
                let resize = session.resize.as_ref().ok_or(Error::ResizeNotActive)?;
                let id = resize.element_id();
                let update = resize.update(pointer);
                session.canvas.update_element(id, update);
                Ok::<_, Error>(session.canvas.get(id).cloned())
            })
            .await??;
            Ok(updated_reply(element))
        }

        ClientMessage::ResizeEnd => {
            with_session(state, session_id, |session| {
                session.resize = None;
            })
            .await?;
            Ok(Vec::new())
        }

        ClientMessage::ExportCode { use_ai } => {
            let (elements, ai_enabled) = with_session(state, session_id, |session| {
                let ordered: Vec<Element> =
                    session.canvas.render_order().into_iter().cloned().collect();
                (ordered, session.ai_enabled)
            })
            .await?;

            let refs: Vec<&Element> = elements.iter().collect();
            let outcome =
                generate_export(state.backend.as_deref(), use_ai && ai_enabled, &refs).await;

            // quota failures turn the AI path off for the session
            if outcome.failure == Some(FailureCategory::Quota) {
                with_session(state, session_id, |session| {
                    session.ai_enabled = false;
                })
                .await?;
            }

            Ok(vec![ServerMessage::CodeGenerated {
                html: outcome.code.html,
                css: outcome.code.css,
                js: outcome.code.js,
                source: outcome.source,
                fallback_reason: outcome
                    .failure
                    .map(|category| format!("{}: {}", category, category.user_message())),
            }])
        }
    }
}

fn updated_reply(element: Option<Element>) -> Vec<ServerMessage> {
    element
        .map(|element| vec![ServerMessage::ElementUpdated { element }])
        .unwrap_or_default()
}

async fn with_session<F, R>(state: &AppState, session_id: Uuid, f: F) -> Result<R, Error>
where
    F: FnOnce(&mut maquette_canvas::BuilderSession) -> R,
{
    state
        .sessions
        .update_session(session_id, f)
        .await
        .ok_or(Error::SessionNotFound(session_id))
}
