use std::collections::HashSet;

use homeplate_shared::mealplan::{Moment, PlannedMeal};
use homeplate_shared::recipe::Recipe;
use time::Date;

/// Supplies the recipes a user may be planned with
#[async_trait::async_trait]
pub trait RecipeCatalog {
    /// A random sample of at most `limit` recipes, with tags and average rating
    async fn candidates(&self, user_id: &str, limit: u32) -> homeplate_shared::Result<Vec<Recipe>>;

    /// The subset of `recipe_ids` that exist and are official or owned by `user_id`
    async fn visible_recipes(
        &self,
        user_id: &str,
        recipe_ids: &[String],
    ) -> homeplate_shared::Result<HashSet<String>>;
}

/// Supplies recipes a user already had planned
#[async_trait::async_trait]
pub trait RecentUse {
    /// Recipe ids planned for `user_id` between `since` and `until`, both inclusive
    async fn recently_used(
        &self,
        user_id: &str,
        since: Date,
        until: Date,
    ) -> homeplate_shared::Result<HashSet<String>>;
}

#[async_trait::async_trait]
pub trait MomentCatalog {
    async fn moments(&self) -> homeplate_shared::Result<Vec<Moment>>;
}

/// Persists planned meals. Every write replaces what was there, it never merges.
#[async_trait::async_trait]
pub trait PlanWriter {
    /// Deletes every meal of `user_id` between `start` and `end` then inserts `meals`
    async fn replace_range(
        &self,
        user_id: &str,
        start: Date,
        end: Date,
        meals: &[PlannedMeal],
    ) -> homeplate_shared::Result<()>;

    /// Deletes the meals sitting on the same (date, moment) as `meals` then inserts them
    async fn replace_slots(
        &self,
        user_id: &str,
        meals: &[PlannedMeal],
    ) -> homeplate_shared::Result<()>;

    /// Returns false when `user_id` owns no meal `meal_id`
    async fn update_recipe(
        &self,
        user_id: &str,
        meal_id: &str,
        recipe_id: &str,
    ) -> homeplate_shared::Result<bool>;
}
