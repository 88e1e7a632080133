use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ProductRequests::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ProductRequests::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(ProductRequests::UserId).integer().not_null())
          .col(ColumnDef::new(ProductRequests::Title).string().not_null())
          .col(ColumnDef::new(ProductRequests::Note).text().null())
          .col(
            ColumnDef::new(ProductRequests::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(
            ColumnDef::new(ProductRequests::CreatedAt).date_time().not_null(),
          )
          .col(
            ColumnDef::new(ProductRequests::UpdatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_product_requests_user")
              .from(ProductRequests::Table, ProductRequests::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_product_requests_user")
          .table(ProductRequests::Table)
          .col(ProductRequests::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ProductRequests::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ProductRequests {
  Table,
  Id,
  UserId,
  Title,
  Note,
  Status,
  CreatedAt,
  UpdatedAt,
}
