//! Sample data for a fresh database.

use pantry_core::{NewRecipe, PantryStore, StoreResult};
use tracing::info;

use crate::state::AppState;

const SAMPLE_RECIPES: &[(&str, &str, &str, &str)] = &[
    (
        "Omelete de queijo",
        "café da manhã",
        "2 ovos, sal, queijo ralado, manteiga",
        "Bata os ovos com sal, despeje na frigideira com manteiga e finalize com queijo.",
    ),
    (
        "Arroz com feijão",
        "almoço",
        "arroz, feijão, alho, cebola, sal",
        "Refogue alho e cebola, cozinhe o arroz e sirva com o feijão temperado.",
    ),
    (
        "Sopa de legumes",
        "jantar",
        "batata, cenoura, cebola, água, sal",
        "Corte os legumes e cozinhe em água com sal até ficarem macios.",
    ),
];

const SAMPLE_PANTRY: &[(&str, bool)] = &[
    ("arroz", true),
    ("sal", true),
    ("ovos", true),
    ("cebola", false),
    ("leite", false),
];

/// Inserts the sample recipes and pantry entries into empty tables. Tables
/// that already hold data are left alone.
pub async fn seed_sample_data(state: &AppState) -> StoreResult<()> {
    if state.recipes.count().await? == 0 {
        for (name, meal_type, ingredients, instructions) in SAMPLE_RECIPES {
            state
                .recipes
                .create(NewRecipe {
                    name: name.to_string(),
                    meal_type: meal_type.to_string(),
                    ingredients: ingredients.to_string(),
                    instructions: instructions.to_string(),
                })
                .await?;
        }
        info!(count = SAMPLE_RECIPES.len(), "seeded sample recipes");
    }

    if state.pantry.list_all().await?.is_empty() {
        for (ingredient, has_item) in SAMPLE_PANTRY {
            state.pantry.upsert(ingredient, *has_item).await?;
        }
        info!(count = SAMPLE_PANTRY.len(), "seeded sample pantry");
    }

    Ok(())
}
