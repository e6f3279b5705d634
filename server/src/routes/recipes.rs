use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pantry_core::{NewRecipe, Recipe, ReconcileSummary, UpdateRecipe};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /recipes/process-ingredients`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessIngredients {
    #[serde(default)]
    pub recipe_id: Option<Uuid>,
    #[serde(default)]
    pub ingredients: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    pub data: ReconcileSummary,
}

impl ProcessResponse {
    fn new(data: ReconcileSummary) -> Self {
        Self {
            success: true,
            message: format!(
                "{} ingredients processed, {} added to the shopping list",
                data.processed_count, data.added_to_shopping_list
            ),
            data,
        }
    }
}

pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.list().await?))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<NewRecipe>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("recipe name is required".to_string()));
    }
    let recipe = state.recipes.create(input).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Recipe>> {
    state
        .recipes
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("recipe".to_string()))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRecipe>,
) -> AppResult<Json<Recipe>> {
    state
        .recipes
        .update(id, input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("recipe".to_string()))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.recipes.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("recipe".to_string()))
    }
}

/// Reconciles a raw ingredient list from the request body.
///
/// The ingredient text is validated before any storage access.
pub async fn process_ingredients(
    State(state): State<AppState>,
    Json(input): Json<ProcessIngredients>,
) -> AppResult<Json<ProcessResponse>> {
    let raw = input
        .ingredients
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("ingredients are required".to_string()))?;

    if let Some(id) = input.recipe_id {
        if state.recipes.get(id).await?.is_none() {
            return Err(AppError::NotFound("recipe".to_string()));
        }
    }

    let summary = state.reconciler.process(state.pantry.as_ref(), &raw).await?;
    Ok(Json(ProcessResponse::new(summary)))
}

/// Reconciles the stored ingredient text of recipe `id`.
pub async fn process_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProcessResponse>> {
    let recipe = state
        .recipes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("recipe".to_string()))?;

    let summary = state
        .reconciler
        .process(state.pantry.as_ref(), &recipe.ingredients)
        .await?;
    Ok(Json(ProcessResponse::new(summary)))
}
