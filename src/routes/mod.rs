use axum::{
    Router,
    routing::{get, post, put},
};
use sqlx::SqlitePool;

mod health;
mod meal_plan;
mod moments;

#[derive(Clone)]
pub struct AppState {
    pub command: homeplate_mealplan::Command<homeplate_shared::State>,
    pub query: homeplate_mealplan::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(
        state: homeplate_shared::State,
        settings: homeplate_mealplan::PlannerSettings,
    ) -> Self {
        Self {
            pool: state.read_db.clone(),
            query: homeplate_mealplan::Query(state.clone()),
            command: homeplate_mealplan::Command::with_settings(state, settings),
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/moments", get(moments::list))
        .route("/api/meal-plan", get(meal_plan::week).post(meal_plan::save))
        .route("/api/meal-plan/generate", post(meal_plan::generate))
        .route("/api/meal-plan/slots", post(meal_plan::fill_slots))
        .route("/api/meal-plan/{id}", put(meal_plan::change))
        .with_state(app_state)
}
