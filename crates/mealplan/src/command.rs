use std::collections::HashSet;
use std::ops::Deref;

use homeplate_shared::mealplan::{Moment, PlanSlot, PlannedMeal};
use homeplate_shared::user::MealPreferences;
use serde::Serialize;
use time::{Date, Duration};
use validator::Validate;

use crate::{MomentCatalog, PlanWriter, RecentUse, RecipeCatalog};

#[derive(Clone, Debug)]
pub struct PlannerSettings {
    /// Upper bound of the random candidate sample fetched per run
    pub candidate_limit: u32,
    /// Recipes planned this many days before the week are left out
    pub recent_window_days: u16,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            candidate_limit: 50,
            recent_window_days: 14,
        }
    }
}

/// Most slots a single fill request may ask for
pub const MAX_SLOTS: u64 = 100;

#[derive(Validate)]
pub struct Generate {
    pub user_id: String,
    pub start: Date,
    /// Moment names in evaluation order, every catalog moment when `None`
    pub moments: Option<Vec<String>>,
    #[validate(nested)]
    pub preferences: MealPreferences,
    pub save: bool,
}

#[derive(Validate)]
pub struct FillSlots {
    pub user_id: String,
    #[validate(length(max = MAX_SLOTS))]
    pub slots: Vec<PlanSlot>,
    #[validate(nested)]
    pub preferences: MealPreferences,
    pub save: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedPlan {
    pub start: Date,
    pub end: Date,
    /// Number of slots the run attempted to fill
    pub requested: usize,
    pub planned: usize,
    pub meals: Vec<PlannedMeal>,
}

impl GeneratedPlan {
    pub fn is_partial(&self) -> bool {
        self.planned < self.requested
    }
}

#[derive(Clone)]
pub struct Command<S> {
    state: S,
    settings: PlannerSettings,
}

impl<S> Deref for Command<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<S> Command<S> {
    pub fn new(state: S) -> Self {
        Self::with_settings(state, PlannerSettings::default())
    }

    pub fn with_settings(state: S, settings: PlannerSettings) -> Self {
        Self { state, settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }
}

impl<S> Command<S>
where
    S: RecipeCatalog + RecentUse + MomentCatalog + PlanWriter + Send + Sync,
{
    /// Plans the week containing `input.start`, starting on its Monday
    pub async fn generate(&self, input: Generate) -> homeplate_shared::Result<GeneratedPlan> {
        input.validate()?;

        let start = homeplate_shared::week_start(input.start);
        let end = homeplate_shared::week_end(start)?;
        let moments = self.resolve_moments(input.moments.as_deref()).await?;

        let candidates = self
            .candidates(&input.user_id, self.settings.candidate_limit)
            .await?;

        if candidates.is_empty() {
            homeplate_shared::user!("no recipes available");
        }

        let recently_used = match start.previous_day() {
            Some(until) => {
                let since = start
                    .checked_sub(Duration::days(self.settings.recent_window_days.into()))
                    .unwrap_or(Date::MIN);

                self.recently_used(&input.user_id, since, until).await?
            }
            _ => HashSet::new(),
        };

        let meals = crate::generate_weekly_plan(
            &candidates,
            &recently_used,
            &moments,
            start,
            &input.preferences,
        );

        let plan = GeneratedPlan {
            start,
            end,
            requested: moments.len() * homeplate_shared::week_days(start).count(),
            planned: meals.len(),
            meals,
        };

        if input.save {
            self.replace_range(&input.user_id, start, end, &plan.meals)
                .await?;
        }

        tracing::info!(
            user_id = %input.user_id,
            %start,
            candidates = candidates.len(),
            recently_used = recently_used.len(),
            requested = plan.requested,
            planned = plan.planned,
            save = input.save,
            "meal plan generated"
        );

        Ok(plan)
    }

    /// Fills exactly the requested slots with random recipes, leaving the rest of the week untouched.
    /// A (date, moment) asked for more than once is filled once.
    pub async fn fill_slots(&self, input: FillSlots) -> homeplate_shared::Result<Vec<PlannedMeal>> {
        input.validate()?;

        if input.slots.is_empty() {
            return Ok(vec![]);
        }

        let moments = self.moments().await?;
        let candidates = self
            .candidates(&input.user_id, self.settings.candidate_limit)
            .await?;

        if candidates.is_empty() {
            homeplate_shared::user!("no recipes available");
        }

        let pool = candidates
            .iter()
            .filter(|recipe| input.preferences.accepts(recipe))
            .collect::<Vec<_>>();

        let mut filled = HashSet::new();
        let mut meals = crate::slot::fill_slots(&pool, &moments, &input.slots);
        meals.retain(|meal| filled.insert((meal.date, meal.moment.id.to_owned())));

        if input.save && !meals.is_empty() {
            self.replace_slots(&input.user_id, &meals).await?;
        }

        tracing::info!(
            user_id = %input.user_id,
            requested = input.slots.len(),
            planned = meals.len(),
            save = input.save,
            "meal slots filled"
        );

        Ok(meals)
    }

    /// Persists a previewed plan over the 7 days starting at its earliest date
    pub async fn save_plan(
        &self,
        user_id: impl Into<String>,
        meals: Vec<PlannedMeal>,
    ) -> homeplate_shared::Result<()> {
        let user_id = user_id.into();

        let Some(start) = meals.iter().map(|meal| meal.date).min() else {
            homeplate_shared::user!("meal plan is empty");
        };

        let end = homeplate_shared::week_end(start)?;

        if let Some(meal) = meals.iter().find(|meal| meal.date > end) {
            homeplate_shared::user!("{} is outside the week starting at {start}", meal.date);
        }

        let moments = self.moments().await?;
        if let Some(meal) = meals
            .iter()
            .find(|meal| !moments.iter().any(|m| m.id == meal.moment.id))
        {
            homeplate_shared::user!("unknown moment {}", meal.moment.id);
        }

        let mut slots = HashSet::new();
        if let Some(meal) = meals
            .iter()
            .find(|meal| !slots.insert((meal.date, meal.moment.id.as_str())))
        {
            homeplate_shared::user!("{} {} is planned twice", meal.date, meal.moment.name);
        }

        let recipe_ids = meals
            .iter()
            .map(|meal| meal.recipe.id.to_owned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let visible = self.visible_recipes(&user_id, &recipe_ids).await?;
        if let Some(id) = recipe_ids.iter().find(|id| !visible.contains(*id)) {
            homeplate_shared::user!("unknown recipe {id}");
        }

        self.replace_range(&user_id, start, end, &meals).await?;

        tracing::info!(%user_id, %start, meals = meals.len(), "meal plan saved");

        Ok(())
    }

    /// Swaps the recipe of one planned meal
    pub async fn change_meal(
        &self,
        user_id: impl Into<String>,
        meal_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> homeplate_shared::Result<()> {
        let user_id = user_id.into();
        let meal_id = meal_id.into();
        let recipe_id = recipe_id.into();

        if !self.update_recipe(&user_id, &meal_id, &recipe_id).await? {
            return Err(homeplate_shared::Error::NotFound);
        }

        tracing::info!(%user_id, %meal_id, %recipe_id, "planned meal changed");

        Ok(())
    }

    async fn resolve_moments(
        &self,
        names: Option<&[String]>,
    ) -> homeplate_shared::Result<Vec<Moment>> {
        let catalog = self.moments().await?;

        let Some(names) = names else {
            return Ok(catalog);
        };

        let mut moments: Vec<Moment> = vec![];
        for name in names {
            let Some(moment) = crate::find_moment(&catalog, name) else {
                homeplate_shared::user!("unknown moment {name}");
            };

            if !moments.contains(moment) {
                moments.push(moment.to_owned());
            }
        }

        if moments.is_empty() {
            homeplate_shared::user!("at least one moment is required");
        }

        Ok(moments)
    }
}
