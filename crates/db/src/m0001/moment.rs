use sea_query::{ColumnDef, Query, Table, TableCreateStatement, TableDropStatement};

use crate::table::Moment;

const DEFAULT_MOMENTS: [(&str, &str, i32); 3] = [
    ("breakfast", "Breakfast", 0),
    ("lunch", "Lunch", 1),
    ("dinner", "Dinner", 2),
];

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Moment::Table)
        .col(
            ColumnDef::new(Moment::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Moment::Name)
                .string()
                .not_null()
                .string_len(50)
                .unique_key(),
        )
        .col(
            ColumnDef::new(Moment::Position)
                .integer()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Moment::Table).to_owned()
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

pub struct Seed;

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Seed {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let mut statement = Query::insert()
            .into_table(Moment::Table)
            .columns([Moment::Id, Moment::Name, Moment::Position])
            .to_owned();

        for (id, name, position) in DEFAULT_MOMENTS {
            statement.values_panic([id.into(), name.into(), position.into()]);
        }

        let statement = statement.to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = Query::delete()
            .from_table(Moment::Table)
            .to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
