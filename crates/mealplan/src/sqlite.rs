use std::collections::{HashMap, HashSet};

use homeplate_db::table;
use homeplate_shared::mealplan::{Moment, PlannedMeal};
use homeplate_shared::recipe::{Recipe, Tag};
use homeplate_shared::{State, to_timestamp};
use sea_query::{Cond, Expr, ExprTrait, Func, Order, Query, SimpleExpr, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::Date;

use crate::{MomentCatalog, PlanWriter, RecentUse, RecipeCatalog};

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    cook_time: u32,
    base_servings: u16,
}

#[async_trait::async_trait]
impl RecipeCatalog for State {
    async fn candidates(&self, user_id: &str, limit: u32) -> homeplate_shared::Result<Vec<Recipe>> {
        let statement = Query::select()
            .columns([
                table::Recipe::Id,
                table::Recipe::Name,
                table::Recipe::CookTime,
                table::Recipe::BaseServings,
            ])
            .from(table::Recipe::Table)
            .cond_where(visible_to(user_id))
            .order_by_expr(SimpleExpr::FunctionCall(Func::random()), Order::Asc)
            .limit(limit.into())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|r| r.id.to_owned()).collect::<Vec<_>>();
        let mut tags = find_tags(self, &ids).await?;
        let ratings = find_ratings(self, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| Recipe {
                tags: tags.remove(&row.id).unwrap_or_default(),
                rating: ratings.get(&row.id).copied(),
                id: row.id,
                name: row.name,
                cook_time: row.cook_time,
                base_servings: row.base_servings,
            })
            .collect())
    }

    async fn visible_recipes(
        &self,
        user_id: &str,
        recipe_ids: &[String],
    ) -> homeplate_shared::Result<HashSet<String>> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let statement = Query::select()
            .column(table::Recipe::Id)
            .from(table::Recipe::Table)
            .cond_where(
                Cond::all()
                    .add(Expr::col(table::Recipe::Id).is_in(recipe_ids.iter().cloned()))
                    .add(visible_to(user_id)),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

/// Official recipes and the ones `user_id` owns
fn visible_to(user_id: &str) -> Cond {
    Cond::any()
        .add(Expr::col(table::Recipe::IsOfficial).eq(true))
        .add(Expr::col(table::Recipe::UserId).eq(user_id))
}

async fn find_tags(
    state: &State,
    recipe_ids: &[String],
) -> homeplate_shared::Result<HashMap<String, Vec<Tag>>> {
    let statement = Query::select()
        .column((table::RecipeTag::Table, table::RecipeTag::RecipeId))
        .column((table::Tag::Table, table::Tag::Id))
        .column((table::Tag::Table, table::Tag::Name))
        .from(table::RecipeTag::Table)
        .inner_join(
            table::Tag::Table,
            Expr::col((table::Tag::Table, table::Tag::Id))
                .equals((table::RecipeTag::Table, table::RecipeTag::TagId)),
        )
        .and_where(
            Expr::col((table::RecipeTag::Table, table::RecipeTag::RecipeId))
                .is_in(recipe_ids.iter().cloned()),
        )
        .order_by((table::Tag::Table, table::Tag::Name), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String, String, String), _>(&sql, values)
        .fetch_all(&state.read_db)
        .await?;

    let mut tags: HashMap<String, Vec<Tag>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        tags.entry(recipe_id).or_default().push(Tag { id, name });
    }

    Ok(tags)
}

async fn find_ratings(
    state: &State,
    recipe_ids: &[String],
) -> homeplate_shared::Result<HashMap<String, f32>> {
    let statement = Query::select()
        .column(table::RecipeRating::RecipeId)
        .expr(Func::avg(Expr::col(table::RecipeRating::Score)))
        .from(table::RecipeRating::Table)
        .and_where(Expr::col(table::RecipeRating::RecipeId).is_in(recipe_ids.iter().cloned()))
        .group_by_col(table::RecipeRating::RecipeId)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String, f64), _>(&sql, values)
        .fetch_all(&state.read_db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(recipe_id, average)| (recipe_id, average as f32))
        .collect())
}

#[async_trait::async_trait]
impl RecentUse for State {
    async fn recently_used(
        &self,
        user_id: &str,
        since: Date,
        until: Date,
    ) -> homeplate_shared::Result<HashSet<String>> {
        let statement = Query::select()
            .distinct()
            .column(table::PlannedMeal::RecipeId)
            .from(table::PlannedMeal::Table)
            .and_where(Expr::col(table::PlannedMeal::UserId).eq(user_id))
            .and_where(Expr::col(table::PlannedMeal::Day).gte(to_timestamp(since)))
            .and_where(Expr::col(table::PlannedMeal::Day).lte(to_timestamp(until)))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[async_trait::async_trait]
impl MomentCatalog for State {
    async fn moments(&self) -> homeplate_shared::Result<Vec<Moment>> {
        let statement = Query::select()
            .columns([table::Moment::Id, table::Moment::Name])
            .from(table::Moment::Table)
            .order_by(table::Moment::Position, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Moment { id, name })
            .collect())
    }
}

#[async_trait::async_trait]
impl PlanWriter for State {
    async fn replace_range(
        &self,
        user_id: &str,
        start: Date,
        end: Date,
        meals: &[PlannedMeal],
    ) -> homeplate_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::delete()
            .from_table(table::PlannedMeal::Table)
            .and_where(Expr::col(table::PlannedMeal::UserId).eq(user_id))
            .and_where(Expr::col(table::PlannedMeal::Day).gte(to_timestamp(start)))
            .and_where(Expr::col(table::PlannedMeal::Day).lte(to_timestamp(end)))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        insert_meals(&mut tx, user_id, meals).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn replace_slots(
        &self,
        user_id: &str,
        meals: &[PlannedMeal],
    ) -> homeplate_shared::Result<()> {
        if meals.is_empty() {
            return Ok(());
        }

        let slots = meals.iter().fold(Cond::any(), |cond, meal| {
            cond.add(
                Cond::all()
                    .add(Expr::col(table::PlannedMeal::Day).eq(to_timestamp(meal.date)))
                    .add(Expr::col(table::PlannedMeal::MomentId).eq(meal.moment.id.as_str())),
            )
        });

        let mut tx = self.write_db.begin().await?;

        let statement = Query::delete()
            .from_table(table::PlannedMeal::Table)
            .cond_where(
                Cond::all()
                    .add(Expr::col(table::PlannedMeal::UserId).eq(user_id))
                    .add(slots),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        insert_meals(&mut tx, user_id, meals).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_recipe(
        &self,
        user_id: &str,
        meal_id: &str,
        recipe_id: &str,
    ) -> homeplate_shared::Result<bool> {
        let visible_recipe = Query::select()
            .column(table::Recipe::Id)
            .from(table::Recipe::Table)
            .cond_where(
                Cond::all()
                    .add(Expr::col(table::Recipe::Id).eq(recipe_id))
                    .add(visible_to(user_id)),
            )
            .to_owned();

        let statement = Query::update()
            .table(table::PlannedMeal::Table)
            .value(table::PlannedMeal::RecipeId, recipe_id)
            .and_where(Expr::col(table::PlannedMeal::Id).eq(meal_id))
            .and_where(Expr::col(table::PlannedMeal::UserId).eq(user_id))
            .and_where(Expr::exists(visible_recipe))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_meals(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    meals: &[PlannedMeal],
) -> homeplate_shared::Result<()> {
    if meals.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(table::PlannedMeal::Table)
        .columns([
            table::PlannedMeal::Id,
            table::PlannedMeal::UserId,
            table::PlannedMeal::Day,
            table::PlannedMeal::MomentId,
            table::PlannedMeal::RecipeId,
        ])
        .to_owned();

    for meal in meals {
        statement.values_panic([
            ulid::Ulid::new().to_string().into(),
            user_id.into(),
            to_timestamp(meal.date).into(),
            meal.moment.id.to_owned().into(),
            meal.recipe.id.to_owned().into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut **tx).await?;

    Ok(())
}
