use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::recipe::{DietaryRestriction, Recipe};

/// Dietary constraints applied before any recipe is planned
///
/// A `false` flag or a missing/zero `max_cook_minutes` means no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct MealPreferences {
    #[serde(default)]
    pub vegetarian_only: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    #[validate(range(max = 1440))]
    pub max_cook_minutes: Option<u32>,
}

impl MealPreferences {
    pub fn dietary_restrictions(&self) -> Vec<DietaryRestriction> {
        let mut restrictions = vec![];

        if self.vegetarian_only {
            restrictions.push(DietaryRestriction::Vegetarian);
        }

        if self.gluten_free {
            restrictions.push(DietaryRestriction::GlutenFree);
        }

        restrictions
    }

    pub fn cook_time_limit(&self) -> Option<u32> {
        self.max_cook_minutes.filter(|minutes| *minutes > 0)
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        if !self
            .dietary_restrictions()
            .iter()
            .all(|restriction| restriction.exists_in(&recipe.tags))
        {
            return false;
        }

        match self.cook_time_limit() {
            Some(limit) => recipe.cook_time <= limit,
            _ => true,
        }
    }
}
