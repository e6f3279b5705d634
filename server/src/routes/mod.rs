use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod pantry;
pub mod recipes;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/recipes", get(recipes::list_recipes).post(recipes::create_recipe))
        .route("/recipes/process-ingredients", post(recipes::process_ingredients))
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/{id}/process-ingredients", post(recipes::process_recipe))
        .route("/pantry", get(pantry::list_pantry).post(pantry::upsert_entry))
        .route("/pantry/shopping-list", get(pantry::shopping_list))
        .route(
            "/pantry/{id}",
            get(pantry::get_entry)
                .put(pantry::set_availability)
                .delete(pantry::delete_entry),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
