use std::{path::PathBuf, str::FromStr};

use homeplate_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use time::Date;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    homeplate_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

pub struct RecipeInput<'a> {
    pub id: &'a str,
    pub user_id: Option<&'a str>,
    pub cook_time: u32,
    pub tags: &'a [&'a str],
}

impl<'a> RecipeInput<'a> {
    pub fn official(id: &'a str, cook_time: u32, tags: &'a [&'a str]) -> Self {
        Self {
            id,
            user_id: None,
            cook_time,
            tags,
        }
    }
}

#[allow(dead_code)]
pub async fn create_recipe(state: &State, input: RecipeInput<'_>) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO recipe (id, user_id, name, cook_time, base_servings, is_official) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(input.id)
    .bind(input.user_id)
    .bind(format!("recipe {}", input.id))
    .bind(input.cook_time)
    .bind(4)
    .bind(input.user_id.is_none())
    .execute(&state.write_db)
    .await?;

    for name in input.tags {
        let tag_id = name.to_lowercase();
        sqlx::query("INSERT OR IGNORE INTO tag (id, name) VALUES (?, ?)")
            .bind(&tag_id)
            .bind(name)
            .execute(&state.write_db)
            .await?;

        sqlx::query("INSERT INTO recipe_tag (recipe_id, tag_id) VALUES (?, ?)")
            .bind(input.id)
            .bind(&tag_id)
            .execute(&state.write_db)
            .await?;
    }

    Ok(())
}

#[allow(dead_code)]
pub async fn create_recipes(
    state: &State,
    ids: impl IntoIterator<Item = impl Into<String>>,
    cook_time: u32,
) -> anyhow::Result<Vec<String>> {
    let mut created = vec![];
    for id in ids.into_iter() {
        let id = id.into();
        create_recipe(state, RecipeInput::official(&id, cook_time, &[])).await?;
        created.push(id);
    }

    Ok(created)
}

#[allow(dead_code)]
pub async fn rate_recipe(
    state: &State,
    recipe_id: &str,
    user_id: &str,
    score: f32,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO recipe_rating (recipe_id, user_id, score) VALUES (?, ?, ?)")
        .bind(recipe_id)
        .bind(user_id)
        .bind(score)
        .execute(&state.write_db)
        .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn plan_meal(
    state: &State,
    user_id: &str,
    day: Date,
    moment_id: &str,
    recipe_id: &str,
) -> anyhow::Result<String> {
    let id = ulid::Ulid::new().to_string();
    sqlx::query(
        "INSERT INTO planned_meal (id, user_id, day, moment_id, recipe_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(homeplate_shared::to_timestamp(day))
    .bind(moment_id)
    .bind(recipe_id)
    .execute(&state.write_db)
    .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn planned_ids(state: &State, user_id: &str) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM planned_meal WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(&state.read_db)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
