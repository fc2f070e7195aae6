use std::collections::HashSet;

use homeplate_shared::mealplan::{Moment, MomentKind, PlannedMeal};
use homeplate_shared::recipe::Recipe;
use homeplate_shared::user::MealPreferences;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use strum::VariantArray;
use time::Date;

/// Recipes cooking at most this long count as quick meals
pub const QUICK_MEAL_MINUTES: u32 = 20;

/// Weights closer than this are considered equivalent when ordering candidates
pub const TIE_BREAK_MARGIN: f32 = 0.5;

pub const SHORTLIST_SIZE: usize = 3;

const MOMENT_TAG_BONUS: f32 = 2.0;
const QUICK_MEAL_BONUS: f32 = 1.0;

/// Recipes allowed anywhere in the plan: not recently used and matching every active preference
pub fn eligible_pool<'a>(
    candidates: &'a [Recipe],
    recently_used: &HashSet<String>,
    preferences: &MealPreferences,
) -> Vec<&'a Recipe> {
    candidates
        .iter()
        .filter(|recipe| !recently_used.contains(&recipe.id))
        .filter(|recipe| preferences.accepts(recipe))
        .collect()
}

/// Assigns at most one recipe to every moment of the 7 days starting at `week_start`.
///
/// Slots without a suitable candidate are left out, so the plan can be shorter than
/// `moments.len() * 7`. A recipe is never planned twice in the same run and recipes planned the
/// same day never share a tag.
pub fn generate_weekly_plan(
    candidates: &[Recipe],
    recently_used: &HashSet<String>,
    moments: &[Moment],
    week_start: Date,
    preferences: &MealPreferences,
) -> Vec<PlannedMeal> {
    generate_weekly_plan_with(
        &mut rand::rng(),
        candidates,
        recently_used,
        moments,
        week_start,
        preferences,
    )
}

pub fn generate_weekly_plan_with<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[Recipe],
    recently_used: &HashSet<String>,
    moments: &[Moment],
    week_start: Date,
    preferences: &MealPreferences,
) -> Vec<PlannedMeal> {
    let pool = eligible_pool(candidates, recently_used, preferences);
    let moment_names = moments
        .iter()
        .map(|m| m.name.as_str())
        .chain(MomentKind::VARIANTS.iter().map(|kind| kind.as_ref()))
        .collect::<HashSet<_>>();

    let mut used_this_week: HashSet<&str> = HashSet::new();
    let mut plan = vec![];

    for date in homeplate_shared::week_days(week_start) {
        let mut day_claimed_tags: HashSet<&str> = HashSet::new();

        for moment in moments {
            let available = pool
                .iter()
                .copied()
                .filter(|recipe| !used_this_week.contains(recipe.id.as_str()))
                .filter(|recipe| !recipe.tag_names().any(|tag| day_claimed_tags.contains(tag)))
                .filter(|recipe| suits_moment(recipe, moment, &moment_names))
                .collect::<Vec<_>>();

            let Some(recipe) = select_best_recipe_with(rng, &available, &moment.name) else {
                tracing::debug!(%date, moment = %moment.name, "no candidate left, slot skipped");
                continue;
            };

            plan.push(PlannedMeal::new(date, moment, recipe));
            used_this_week.insert(recipe.id.as_str());
            day_claimed_tags.extend(recipe.tag_names());
        }
    }

    plan
}

/// A recipe tagged with the name of any other moment never fits this one, whatever else it is
/// tagged with. Breakfast additionally requires a quick meal.
pub fn suits_moment(recipe: &Recipe, moment: &Moment, moment_names: &HashSet<&str>) -> bool {
    if moment.is(MomentKind::Breakfast) && recipe.cook_time > QUICK_MEAL_MINUTES {
        return false;
    }

    !recipe
        .tag_names()
        .any(|tag| tag != moment.name && moment_names.contains(tag))
}

pub fn recipe_weight(recipe: &Recipe, moment: &str) -> f32 {
    let mut weight = recipe.average_rating();

    if recipe.has_tag(moment) {
        weight += MOMENT_TAG_BONUS;
    }

    if recipe.cook_time <= QUICK_MEAL_MINUTES {
        weight += QUICK_MEAL_BONUS;
    }

    weight
}

/// Picks one recipe among the best weighted candidates for `moment`
pub fn select_best_recipe<'a>(candidates: &[&'a Recipe], moment: &str) -> Option<&'a Recipe> {
    select_best_recipe_with(&mut rand::rng(), candidates, moment)
}

/// Orders candidates by descending weight, shuffles every run of neighbours whose weights are
/// within [`TIE_BREAK_MARGIN`] of each other, then picks uniformly among the first
/// [`SHORTLIST_SIZE`].
pub fn select_best_recipe_with<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[&'a Recipe],
    moment: &str,
) -> Option<&'a Recipe> {
    let mut weighted = candidates
        .iter()
        .map(|recipe| (recipe_weight(recipe, moment), *recipe))
        .collect::<Vec<_>>();

    weighted.sort_by(|a, b| b.0.total_cmp(&a.0));

    for run in weighted.chunk_by_mut(|a, b| a.0 - b.0 < TIE_BREAK_MARGIN) {
        run.shuffle(rng);
    }

    weighted.truncate(SHORTLIST_SIZE);
    weighted.choose(rng).map(|(_, recipe)| *recipe)
}
