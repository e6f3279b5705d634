use chrono::Utc;
use pantry_core::{NewRecipe, Recipe, StoreError, StoreResult, UpdateRecipe};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{column_error, parse_id, parse_timestamp};

const RECIPE_COLUMNS: &str = "id, name, meal_type, ingredients, instructions, created_at";

/// CRUD operations over the `recipes` table.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: NewRecipe) -> StoreResult<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: input.name,
            meal_type: input.meal_type,
            ingredients: input.ingredients,
            instructions: input.instructions,
            created_at: Utc::now(),
        };

        sqlx::query(&format!(
            "INSERT INTO recipes ({RECIPE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ))
        .bind(recipe.id.to_string())
        .bind(&recipe.name)
        .bind(&recipe.meal_type)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to create recipe: {e}")))?;

        debug!(id = %recipe.id, name = %recipe.name, "recipe created");
        Ok(recipe)
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Newest first.
    pub async fn list(&self) -> StoreResult<Vec<Recipe>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at DESC, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to list recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    pub async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to count recipes: {e}")))
    }

    /// Applies the present fields of `update`. Returns `None` when `id` does
    /// not exist.
    pub async fn update(&self, id: Uuid, update: UpdateRecipe) -> StoreResult<Option<Recipe>> {
        let Some(mut recipe) = self.get(id).await? else {
            return Ok(None);
        };
        update.apply_to(&mut recipe);

        sqlx::query(
            r"
            UPDATE recipes
            SET name = ?1, meal_type = ?2, ingredients = ?3, instructions = ?4
            WHERE id = ?5
            ",
        )
        .bind(&recipe.name)
        .bind(&recipe.meal_type)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to update recipe: {e}")))?;

        Ok(Some(recipe))
    }

    /// Returns `false` when `id` does not exist.
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_recipe(row: &SqliteRow) -> StoreResult<Recipe> {
    let id: String = row.try_get("id").map_err(column_error)?;
    let created_at: String = row.try_get("created_at").map_err(column_error)?;

    Ok(Recipe {
        id: parse_id(&id)?,
        name: row.try_get("name").map_err(column_error)?,
        meal_type: row.try_get("meal_type").map_err(column_error)?,
        ingredients: row.try_get("ingredients").map_err(column_error)?,
        instructions: row.try_get("instructions").map_err(column_error)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
