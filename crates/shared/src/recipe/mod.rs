use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Rating used for recipes nobody has rated yet
pub const DEFAULT_RATING: f32 = 3.0;

/// Tags carrying a dietary meaning
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
pub enum DietaryRestriction {
    Vegetarian,
    #[strum(serialize = "Gluten-Free")]
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
}

impl DietaryRestriction {
    pub fn exists_in<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> bool {
        tags.into_iter().any(|t| t.name == self.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// A recipe as seen by the planner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub cook_time: u32,
    pub base_servings: u16,
    pub tags: Vec<Tag>,
    pub rating: Option<f32>,
}

impl Recipe {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    pub fn average_rating(&self) -> f32 {
        self.rating.unwrap_or(DEFAULT_RATING)
    }
}
