use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pantry_core::{PantryEntry, PantryStore, SetAvailability, UpsertPantryEntry};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn list_pantry(State(state): State<AppState>) -> AppResult<Json<Vec<PantryEntry>>> {
    Ok(Json(state.pantry.list_all().await?))
}

pub async fn shopping_list(State(state): State<AppState>) -> AppResult<Json<Vec<PantryEntry>>> {
    Ok(Json(state.pantry.list_missing().await?))
}

pub async fn upsert_entry(
    State(state): State<AppState>,
    Json(input): Json<UpsertPantryEntry>,
) -> AppResult<Json<PantryEntry>> {
    if input.ingredient.trim().is_empty() {
        return Err(AppError::BadRequest("ingredient is required".to_string()));
    }
    let entry = state.pantry.upsert(&input.ingredient, input.has_item).await?;
    Ok(Json(entry))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PantryEntry>> {
    state
        .pantry
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("pantry entry".to_string()))
}

pub async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetAvailability>,
) -> AppResult<Json<PantryEntry>> {
    state
        .pantry
        .set_availability(id, input.has_item)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("pantry entry".to_string()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.pantry.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("pantry entry".to_string()))
    }
}
