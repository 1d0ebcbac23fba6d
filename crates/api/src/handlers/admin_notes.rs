//! Handlers for the `/admin/notes` resource.
//!
//! Notes attach to any entity via `(note_type, reference_id)`. Anyone with
//! MANAGE_NOTES can create and list; updating or deleting a note is
//! restricted to its author or the ADMIN role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use cardvault_core::audit::{action_types, target_types};
use cardvault_core::error::{forbidden_codes, CoreError};
use cardvault_core::roles::Permission;
use cardvault_core::types::DbId;
use cardvault_db::models::admin_note::{AdminNote, CreateAdminNote};
use cardvault_db::repositories::AdminNoteRepo;

use crate::audit::{self, AuditEntry, ClientInfo};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/notes`.
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub note_type: String,
    pub reference_id: DbId,
}

/// Request body for `PUT /admin/notes/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/notes?note_type=&reference_id=
///
/// List notes attached to one entity, newest first. Requires MANAGE_NOTES.
pub async fn list_notes(
    State(state): State<AppState>,
    admin: AdminAuth,
    Query(params): Query<NoteListParams>,
) -> AppResult<Json<ApiResponse<Vec<AdminNote>>>> {
    admin.require(Permission::ManageNotes)?;

    let notes =
        AdminNoteRepo::list_for_reference(&state.pool, &params.note_type, params.reference_id)
            .await?;
    Ok(Json(ApiResponse::new(notes)))
}

/// POST /api/v1/admin/notes
///
/// Attach a note to an entity. Requires MANAGE_NOTES.
pub async fn create_note(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Json(input): Json<CreateAdminNote>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdminNote>>)> {
    admin.require(Permission::ManageNotes)?;

    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content must not be empty".into(),
        )));
    }

    let note = AdminNoteRepo::create(
        &state.pool,
        admin.admin_id,
        &input.note_type,
        input.reference_id,
        input.content.trim(),
    )
    .await?;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::NOTE_CREATE,
            target_type: target_types::ADMIN_NOTE,
            target_id: note.id,
            description: format!(
                "Note attached to {} {}",
                note.note_type, note.reference_id
            ),
            client: &client,
        },
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(note))))
}

/// PUT /api/v1/admin/notes/{note_id}
///
/// Edit a note's content. Author or ADMIN role only.
pub async fn update_note(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(note_id): Path<DbId>,
    Json(input): Json<UpdateNoteRequest>,
) -> AppResult<Json<ApiResponse<AdminNote>>> {
    admin.require(Permission::ManageNotes)?;

    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content must not be empty".into(),
        )));
    }

    let note = find_note_for_author(&state, &admin, note_id).await?;

    let updated = AdminNoteRepo::update_content(&state.pool, note.id, input.content.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminNote",
            id: note_id,
        }))?;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::NOTE_UPDATE,
            target_type: target_types::ADMIN_NOTE,
            target_id: updated.id,
            description: format!("Note {} edited", updated.id),
            client: &client,
        },
    );

    Ok(Json(ApiResponse::new(updated)))
}

/// DELETE /api/v1/admin/notes/{note_id}
///
/// Remove a note. Author or ADMIN role only. Returns 204 No Content.
pub async fn delete_note(
    State(state): State<AppState>,
    admin: AdminAuth,
    client: ClientInfo,
    Path(note_id): Path<DbId>,
) -> AppResult<StatusCode> {
    admin.require(Permission::ManageNotes)?;

    let note = find_note_for_author(&state, &admin, note_id).await?;
    AdminNoteRepo::delete(&state.pool, note.id).await?;

    audit::record(
        &state,
        AuditEntry {
            admin_id: admin.admin_id,
            action_type: action_types::NOTE_DELETE,
            target_type: target_types::ADMIN_NOTE,
            target_id: note.id,
            description: format!(
                "Note {} removed from {} {}",
                note.id, note.note_type, note.reference_id
            ),
            client: &client,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a note and enforce the author-or-ADMIN rule for mutations.
async fn find_note_for_author(
    state: &AppState,
    admin: &AdminAuth,
    note_id: DbId,
) -> AppResult<AdminNote> {
    let note = AdminNoteRepo::find_by_id(&state.pool, note_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminNote",
            id: note_id,
        }))?;

    if note.admin_id != admin.admin_id && !admin.is_admin() {
        return Err(AppError::Core(CoreError::forbidden(
            forbidden_codes::FORBIDDEN,
            "Only the authoring admin or an ADMIN can modify this note",
        )));
    }

    Ok(note)
}
