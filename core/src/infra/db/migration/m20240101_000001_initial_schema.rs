//! Initial database schema for the catalog
//!
//! One table, `entries`, with unique indexes on the two caller-visible keys.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(Entries::Table)
					.if_not_exists()
					.col(ColumnDef::new(Entries::Id).uuid().not_null().primary_key())
					.col(ColumnDef::new(Entries::No).big_integer().not_null())
					.col(ColumnDef::new(Entries::Name).string().not_null())
					.col(
						ColumnDef::new(Entries::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Entries::UpdatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_entries_no")
					.table(Entries::Table)
					.col(Entries::No)
					.unique()
					.if_not_exists()
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_entries_name")
					.table(Entries::Table)
					.col(Entries::Name)
					.unique()
					.if_not_exists()
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(Entries::Table).to_owned())
			.await
	}
}

#[derive(DeriveIden)]
enum Entries {
	Table,
	Id,
	No,
	Name,
	CreatedAt,
	UpdatedAt,
}
