//! # API Endpoint Handlers
//!
//! Each handler validates its request, takes the engine lock in the mode the
//! operation needs (read for equip and inspection, write for mutations), and
//! answers with a JSON body carrying `success` and, on failure, `error`.

use super::{
    AppState,
    types::{
        ActorRequest, CommandRequest, CommandResponse, EquipRequest, EquipResponse,
        ExportResponse, GroupDestroyedRequest, GroupDestroyedResponse, HealthResponse,
        MembershipRequest, MembershipResponse, PersistResponse, ProfileResponse, StatusResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use base64::Engine as _;
use clanskin_core::{ActorId, CommandReply, GroupId, StoreMetrics, store_to_snapshot};

// =============================================================================
// HEALTH / STATUS
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Store-wide counts.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    let metrics = StoreMetrics::from_store(engine.store());

    let response = StatusResponse::new(metrics, engine.excluded().len(), state.clans.len());
    (StatusCode::OK, Json(response))
}

// =============================================================================
// EQUIP HANDLER
// =============================================================================

/// Decide the variant for an item being equipped.
pub async fn equip_handler(
    State(state): State<AppState>,
    Json(request): Json<EquipRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(EquipResponse::error(format!("Invalid request: {}", e))),
        );
    }

    let EquipRequest { actor, mut item } = request;
    let engine = state.engine.read().await;
    let action = engine.on_equip(&actor, &mut item);

    if action.is_overwrite() {
        tracing::debug!(actor = %actor.id, kind = %item.kind, variant = item.variant.value(), "Equip overwritten");
    }

    (StatusCode::OK, Json(EquipResponse::success(action, &item)))
}

// =============================================================================
// COMMAND HANDLERS
// =============================================================================

/// Run a `/clanskin` chat command.
pub async fn command_handler(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(CommandResponse::error(format!("Invalid request: {}", e))),
        );
    }

    let reply = state
        .engine
        .write()
        .await
        .run_command(&request.actor, &request.args);
    respond(&state, &request.actor.id, reply)
}

/// Enter edit mode for the actor's group.
pub async fn edit_handler(
    State(state): State<AppState>,
    Json(request): Json<ActorRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.actor.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(CommandResponse::error(format!("Invalid request: {}", e))),
        );
    }

    let reply = state.engine.write().await.enter_edit(&request.actor);
    respond(&state, &request.actor.id, reply)
}

/// Save the actor's worn outfit to the actor's group.
pub async fn save_handler(
    State(state): State<AppState>,
    Json(request): Json<ActorRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.actor.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(CommandResponse::error(format!("Invalid request: {}", e))),
        );
    }

    let reply = state.engine.write().await.save_outfit(&request.actor);
    respond(&state, &request.actor.id, reply)
}

fn respond(
    state: &AppState,
    actor: &ActorId,
    reply: CommandReply,
) -> (StatusCode, Json<CommandResponse>) {
    if reply.changed_state() {
        tracing::info!(actor = %actor, reply = reply.message_key(), "Profile updated");
    } else {
        tracing::debug!(actor = %actor, reply = reply.message_key(), "Command answered");
    }
    let message = state.messages.render(reply);
    (StatusCode::OK, Json(CommandResponse::success(reply, message)))
}

// =============================================================================
// GROUP LIFECYCLE HANDLERS
// =============================================================================

/// A clan was destroyed or a team disbanded: drop its profile.
pub async fn group_destroyed_handler(
    State(state): State<AppState>,
    Json(request): Json<GroupDestroyedRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.group.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(GroupDestroyedResponse::error(format!("Invalid group: {}", e))),
        );
    }

    let removed = state.engine.write().await.on_group_destroyed(&request.group);
    let released = state.clans.disband(request.group.as_str());
    tracing::info!(group = %request.group, removed, released, "Group destroyed");

    (StatusCode::OK, Json(GroupDestroyedResponse::success(removed)))
}

/// Mirror a clan join or leave from the host.
pub async fn membership_handler(
    State(state): State<AppState>,
    Json(request): Json<MembershipRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MembershipResponse::error(format!("Invalid request: {}", e))),
        );
    }

    let previous = match request.joined_clan() {
        Some(clan) => state.clans.join(request.actor.clone(), clan),
        None => state.clans.leave(&request.actor),
    };
    tracing::debug!(actor = %request.actor, clan = ?request.joined_clan(), ?previous, "Clan membership");

    (StatusCode::OK, Json(MembershipResponse::success(previous)))
}

// =============================================================================
// PROFILE / PERSIST / EXPORT
// =============================================================================

/// Inspect one group's profile.
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> impl IntoResponse {
    let group = GroupId::new(group);
    if let Err(e) = group.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ProfileResponse::error(group.0, format!("Invalid group: {}", e))),
        );
    }

    let engine = state.engine.read().await;
    let profile = engine.store().get(&group);
    (StatusCode::OK, Json(ProfileResponse::success(&group, profile)))
}

/// Flush the store to the data file now.
pub async fn persist_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    match state.data_file.flush(engine.store()) {
        Ok(()) => {
            tracing::info!(profiles = engine.store().len(), "Store flushed");
            (
                StatusCode::OK,
                Json(PersistResponse::success(engine.store().len())),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Flush failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PersistResponse::error(format!("Flush failed: {}", e))),
            )
        }
    }
}

/// Export the store as a base64 binary snapshot.
pub async fn export_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    match store_to_snapshot(engine.store()) {
        Ok(bytes) => {
            let data = base64::engine::general_purpose::STANDARD.encode(bytes);
            (
                StatusCode::OK,
                Json(ExportResponse::success(data, engine.store().len())),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ExportResponse::error(format!("Export failed: {}", e))),
        ),
    }
}
