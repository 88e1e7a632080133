use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Categories::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Categories::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Categories::Slug).string().not_null().unique_key(),
          )
          .col(ColumnDef::new(Categories::Title).string().not_null())
          .col(
            ColumnDef::new(Categories::Position).integer().not_null().default(0),
          )
          .col(
            ColumnDef::new(Categories::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(Categories::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Categories::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Categories {
  Table,
  Id,
  Slug,
  Title,
  Position,
  IsActive,
  CreatedAt,
}
