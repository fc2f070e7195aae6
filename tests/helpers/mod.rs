#![allow(dead_code)]

use std::{path::Path, str::FromStr};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use homeplate::AppState;
use homeplate_mealplan::PlannerSettings;
use homeplate_shared::State;
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use tower::ServiceExt;

pub const USER: &str = "user-1";

pub struct TestApp {
    pub router: Router,
    pub state: State,
}

pub async fn setup_test_app(path: &Path) -> anyhow::Result<TestApp> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    homeplate_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = State::single(pool);
    let router = homeplate::router(AppState::new(state.clone(), PlannerSettings::default()));

    Ok(TestApp { router, state })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<Response<Body>> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(homeplate::auth::USER_ID_HEADER, USER)
                .body(Body::empty())?,
        )
        .await
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> anyhow::Result<Response<Body>> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(homeplate::auth::USER_ID_HEADER, USER)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await
    }
}

pub async fn body_json(response: Response<Body>) -> anyhow::Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn create_recipes(state: &State, count: usize, cook_time: u32) -> anyhow::Result<()> {
    for i in 0..count {
        sqlx::query(
            "INSERT INTO recipe (id, user_id, name, cook_time, base_servings, is_official) VALUES (?, NULL, ?, ?, 4, 1)",
        )
        .bind(format!("r{i}"))
        .bind(format!("recipe {i}"))
        .bind(cook_time)
        .execute(&state.write_db)
        .await?;
    }

    Ok(())
}

pub async fn planned_count(state: &State) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM planned_meal WHERE user_id = ?")
        .bind(USER)
        .fetch_one(&state.read_db)
        .await?;

    Ok(count)
}
