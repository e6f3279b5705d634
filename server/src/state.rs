use std::sync::Arc;

use pantry_core::{PantryStore, Reconciler, StoreResult};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{self, RecipeRepository, SqlitePantry};

#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeRepository,
    pub pantry: Arc<dyn PantryStore>,
    pub reconciler: Reconciler,
}

impl AppState {
    /// Connects to the configured database and makes sure the schema exists.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;
        Ok(Self::from_pool(pool, Reconciler::new(config.reconcile_mode)))
    }

    pub fn from_pool(pool: SqlitePool, reconciler: Reconciler) -> Self {
        Self {
            recipes: RecipeRepository::new(pool.clone()),
            pantry: Arc::new(SqlitePantry::new(pool)),
            reconciler,
        }
    }
}
