use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use homeplate_mealplan::{FillSlots, Generate, GeneratedPlan, WeekMeal};
use homeplate_shared::mealplan::{PlanSlot, PlannedMeal};
use homeplate_shared::user::MealPreferences;
use serde::{Deserialize, Serialize};

use crate::{auth::AuthUser, error::AppResult, routes::AppState};

#[derive(Deserialize)]
pub struct WeekParams {
    pub start: String,
    /// Defaults to the last day of the week starting at `start`
    pub end: Option<String>,
}

/// GET /api/meal-plan?start=YYYY-MM-DD&end=YYYY-MM-DD
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn week(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<Vec<WeekMeal>>> {
    let start = homeplate_shared::parse_date(&params.start)?;
    let end = match params.end {
        Some(end) => homeplate_shared::parse_date(&end)?,
        _ => homeplate_shared::week_end(start)?,
    };

    Ok(Json(state.query.week(user_id, start, end).await?))
}

#[derive(Deserialize)]
pub struct GenerateBody {
    pub start: String,
    pub moments: Option<Vec<String>>,
    #[serde(default)]
    pub preferences: MealPreferences,
    #[serde(default)]
    pub save: bool,
}

/// POST /api/meal-plan/generate
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn generate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<GenerateBody>,
) -> AppResult<Json<GeneratedPlan>> {
    let plan = state
        .command
        .generate(Generate {
            user_id,
            start: homeplate_shared::parse_date(&body.start)?,
            moments: body.moments,
            preferences: body.preferences,
            save: body.save,
        })
        .await?;

    Ok(Json(plan))
}

#[derive(Deserialize)]
pub struct SlotBody {
    pub date: String,
    pub moment: String,
}

#[derive(Deserialize)]
pub struct FillSlotsBody {
    pub slots: Vec<SlotBody>,
    #[serde(default)]
    pub preferences: MealPreferences,
    #[serde(default)]
    pub save: bool,
}

#[derive(Serialize)]
pub struct FillSlotsResponse {
    pub requested: usize,
    pub planned: usize,
    pub meals: Vec<PlannedMeal>,
}

/// POST /api/meal-plan/slots
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn fill_slots(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<FillSlotsBody>,
) -> AppResult<Json<FillSlotsResponse>> {
    let slots = body
        .slots
        .into_iter()
        .map(|slot| {
            Ok(PlanSlot {
                date: homeplate_shared::parse_date(&slot.date)?,
                moment: slot.moment,
            })
        })
        .collect::<homeplate_shared::Result<Vec<_>>>()?;

    let requested = slots.len();
    let meals = state
        .command
        .fill_slots(FillSlots {
            user_id,
            slots,
            preferences: body.preferences,
            save: body.save,
        })
        .await?;

    Ok(Json(FillSlotsResponse {
        requested,
        planned: meals.len(),
        meals,
    }))
}

#[derive(Deserialize)]
pub struct SavePlanBody {
    pub meals: Vec<PlannedMeal>,
}

/// POST /api/meal-plan
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn save(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<SavePlanBody>,
) -> AppResult<StatusCode> {
    state.command.save_plan(user_id, body.meals).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ChangeMealBody {
    pub recipe_id: String,
}

/// PUT /api/meal-plan/{id}
#[tracing::instrument(skip_all, fields(user_id = %user_id, meal_id = %id))]
pub async fn change(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ChangeMealBody>,
) -> AppResult<StatusCode> {
    state.command.change_meal(user_id, id, body.recipe_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
