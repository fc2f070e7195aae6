use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::PlannedMeal;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(PlannedMeal::Table)
        .col(
            ColumnDef::new(PlannedMeal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(PlannedMeal::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(PlannedMeal::Day).big_integer().not_null())
        .col(
            ColumnDef::new(PlannedMeal::MomentId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(PlannedMeal::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(PlannedMeal::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_planned_meal_user_day_moment")
        .table(PlannedMeal::Table)
        .col(PlannedMeal::UserId)
        .col(PlannedMeal::Day)
        .col(PlannedMeal::MomentId)
        .unique()
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_planned_meal_user_day_moment")
        .table(PlannedMeal::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
