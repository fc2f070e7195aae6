use homeplate_shared::mealplan::{Moment, PlanSlot, PlannedMeal};
use homeplate_shared::recipe::Recipe;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Fills each requested slot with a uniformly random recipe from `pool`.
///
/// Unlike [`crate::generate_weekly_plan`] there is no weighting and no per-day or per-run
/// exclusion: the same recipe may fill several slots. Slots naming an unknown moment are skipped.
pub fn fill_slots(pool: &[&Recipe], moments: &[Moment], slots: &[PlanSlot]) -> Vec<PlannedMeal> {
    fill_slots_with(&mut rand::rng(), pool, moments, slots)
}

pub fn fill_slots_with<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[&Recipe],
    moments: &[Moment],
    slots: &[PlanSlot],
) -> Vec<PlannedMeal> {
    let mut meals = vec![];

    for slot in slots {
        let Some(moment) = find_moment(moments, &slot.moment) else {
            tracing::warn!(date = %slot.date, moment = %slot.moment, "unknown moment, slot skipped");
            continue;
        };

        let Some(recipe) = pool.choose(rng) else {
            tracing::debug!(date = %slot.date, moment = %slot.moment, "no recipe available");
            continue;
        };

        meals.push(PlannedMeal::new(slot.date, moment, recipe));
    }

    meals
}

/// Moment names are matched case-insensitively
pub fn find_moment<'a>(moments: &'a [Moment], name: &str) -> Option<&'a Moment> {
    moments
        .iter()
        .find(|moment| moment.name.eq_ignore_ascii_case(name.trim()))
}
