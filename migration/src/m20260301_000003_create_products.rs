use sea_orm_migration::prelude::*;

use super::m20260301_000002_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Products::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Products::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Products::Slug).string().not_null().unique_key())
          .col(ColumnDef::new(Products::Title).string().not_null())
          .col(ColumnDef::new(Products::Description).text().not_null())
          .col(ColumnDef::new(Products::Price).big_integer().not_null())
          .col(
            ColumnDef::new(Products::DiscountPercent)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Products::SalePrice).big_integer().null())
          .col(ColumnDef::new(Products::Stock).integer().not_null().default(0))
          .col(
            ColumnDef::new(Products::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(Products::CategoryId).integer().null())
          .col(ColumnDef::new(Products::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Products::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_products_category")
              .from(Products::Table, Products::CategoryId)
              .to(Categories::Table, Categories::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_products_category")
          .table(Products::Table)
          .col(Products::CategoryId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Products {
  Table,
  Id,
  Slug,
  Title,
  Description,
  Price,
  DiscountPercent,
  SalePrice,
  Stock,
  IsActive,
  CategoryId,
  CreatedAt,
  UpdatedAt,
}
