use std::ops::Deref;

use homeplate_db::table;
use homeplate_shared::mealplan::{Moment, PlannedRecipe};
use homeplate_shared::to_timestamp;
use sea_query::{Alias, Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;
use time::Date;

use crate::MomentCatalog;

#[derive(Default, FromRow)]
pub struct WeekMealRow {
    pub id: String,
    pub day: i64,
    pub moment_id: String,
    pub moment_name: String,
    pub recipe_id: String,
    pub recipe_name: String,
    pub cook_time: u32,
}

/// A persisted planned meal
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekMeal {
    pub id: String,
    pub date: Date,
    pub moment: Moment,
    pub recipe: PlannedRecipe,
}

impl TryFrom<WeekMealRow> for WeekMeal {
    type Error = homeplate_shared::Error;

    fn try_from(value: WeekMealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            date: homeplate_shared::from_timestamp(value.day)?,
            moment: Moment {
                id: value.moment_id,
                name: value.moment_name,
            },
            recipe: PlannedRecipe {
                id: value.recipe_id,
                name: value.recipe_name,
                cook_time: value.cook_time,
            },
        })
    }
}

#[derive(Clone)]
pub struct Query(pub homeplate_shared::State);

impl Deref for Query {
    type Target = homeplate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    /// Meals of `user_id` planned between `start` and `end` inclusive, by date then moment
    pub async fn week(
        &self,
        user_id: impl Into<String>,
        start: Date,
        end: Date,
    ) -> homeplate_shared::Result<Vec<WeekMeal>> {
        if end < start {
            homeplate_shared::user!("end date {end} is before start date {start}");
        }

        let user_id = user_id.into();
        let statement = sea_query::Query::select()
            .column((table::PlannedMeal::Table, table::PlannedMeal::Id))
            .column((table::PlannedMeal::Table, table::PlannedMeal::Day))
            .column((table::PlannedMeal::Table, table::PlannedMeal::MomentId))
            .expr_as(
                Expr::col((table::Moment::Table, table::Moment::Name)),
                Alias::new("moment_name"),
            )
            .column((table::PlannedMeal::Table, table::PlannedMeal::RecipeId))
            .expr_as(
                Expr::col((table::Recipe::Table, table::Recipe::Name)),
                Alias::new("recipe_name"),
            )
            .column((table::Recipe::Table, table::Recipe::CookTime))
            .from(table::PlannedMeal::Table)
            .inner_join(
                table::Moment::Table,
                Expr::col((table::Moment::Table, table::Moment::Id))
                    .equals((table::PlannedMeal::Table, table::PlannedMeal::MomentId)),
            )
            .inner_join(
                table::Recipe::Table,
                Expr::col((table::Recipe::Table, table::Recipe::Id))
                    .equals((table::PlannedMeal::Table, table::PlannedMeal::RecipeId)),
            )
            .and_where(
                Expr::col((table::PlannedMeal::Table, table::PlannedMeal::UserId))
                    .eq(user_id.as_str()),
            )
            .and_where(
                Expr::col((table::PlannedMeal::Table, table::PlannedMeal::Day))
                    .gte(to_timestamp(start)),
            )
            .and_where(
                Expr::col((table::PlannedMeal::Table, table::PlannedMeal::Day))
                    .lte(to_timestamp(end)),
            )
            .order_by((table::PlannedMeal::Table, table::PlannedMeal::Day), Order::Asc)
            .order_by((table::Moment::Table, table::Moment::Position), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, WeekMealRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(WeekMeal::try_from).collect()
    }

    pub async fn moments(&self) -> homeplate_shared::Result<Vec<Moment>> {
        MomentCatalog::moments(&self.0).await
    }
}
