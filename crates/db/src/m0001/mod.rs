mod moment;
mod planned_meal;
mod recipe;
mod recipe_rating;
mod tag;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "homeplate",
    "m0001",
    vec_box![],
    vec_box![
        recipe::CreateTable,
        recipe::CreateIdx1,
        tag::CreateTable,
        tag::CreateRecipeTagTable,
        recipe_rating::CreateTable,
        moment::CreateTable,
        moment::Seed,
        planned_meal::CreateTable,
        planned_meal::CreateIdx1
    ]
);
