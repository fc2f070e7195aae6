use axum::{Json, extract::State};
use homeplate_shared::mealplan::Moment;

use crate::{error::AppResult, routes::AppState};

/// GET /api/moments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Moment>>> {
    Ok(Json(state.query.moments().await?))
}
