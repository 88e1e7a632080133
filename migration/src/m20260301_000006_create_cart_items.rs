use sea_orm_migration::prelude::*;

use super::{
  m20260301_000001_create_users::Users,
  m20260301_000003_create_products::Products,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(CartItems::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(CartItems::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(CartItems::UserId).integer().not_null())
          .col(ColumnDef::new(CartItems::ProductId).integer().not_null())
          .col(ColumnDef::new(CartItems::Quantity).integer().not_null())
          .col(ColumnDef::new(CartItems::AddedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_cart_items_user")
              .from(CartItems::Table, CartItems::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_cart_items_product")
              .from(CartItems::Table, CartItems::ProductId)
              .to(Products::Table, Products::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // One line per product per user
    manager
      .create_index(
        Index::create()
          .name("idx_cart_items_user_product")
          .table(CartItems::Table)
          .col(CartItems::UserId)
          .col(CartItems::ProductId)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(CartItems::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum CartItems {
  Table,
  Id,
  UserId,
  ProductId,
  Quantity,
  AddedAt,
}
