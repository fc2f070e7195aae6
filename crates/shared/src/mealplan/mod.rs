use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

use crate::recipe::Recipe;

/// Moment names the planner gives a meaning to
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
)]
pub enum MomentKind {
    Breakfast,
    Lunch,
    Dinner,
}

/// A meal slot offered every day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    pub id: String,
    pub name: String,
}

impl Moment {
    pub fn kind(&self) -> Option<MomentKind> {
        self.name.parse().ok()
    }

    pub fn is(&self, kind: MomentKind) -> bool {
        self.kind() == Some(kind)
    }
}

/// A (date, moment) pair a caller wants filled
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSlot {
    pub date: Date,
    pub moment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    pub id: String,
    pub name: String,
    pub cook_time: u32,
}

impl From<&Recipe> for PlannedRecipe {
    fn from(value: &Recipe) -> Self {
        Self {
            id: value.id.to_owned(),
            name: value.name.to_owned(),
            cook_time: value.cook_time,
        }
    }
}

/// One recipe assigned to one moment of one day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub date: Date,
    pub moment: Moment,
    pub recipe: PlannedRecipe,
}

impl PlannedMeal {
    pub fn new(date: Date, moment: &Moment, recipe: &Recipe) -> Self {
        Self {
            date,
            moment: moment.to_owned(),
            recipe: recipe.into(),
        }
    }
}
