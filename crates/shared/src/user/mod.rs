mod meal_preferences;

pub use meal_preferences::*;
