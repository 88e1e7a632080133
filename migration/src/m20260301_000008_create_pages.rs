use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Pages::Table)
          .if_not_exists()
          .col(ColumnDef::new(Pages::Slug).string().not_null().primary_key())
          .col(ColumnDef::new(Pages::Title).string().not_null())
          .col(ColumnDef::new(Pages::Body).text().not_null())
          .col(ColumnDef::new(Pages::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Pages::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Pages {
  Table,
  Slug,
  Title,
  Body,
  UpdatedAt,
}
