use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Banners::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Banners::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Banners::Title).string().not_null())
          .col(ColumnDef::new(Banners::Placement).string().not_null())
          .col(ColumnDef::new(Banners::Content).json().not_null())
          .col(
            ColumnDef::new(Banners::Position).integer().not_null().default(0),
          )
          .col(
            ColumnDef::new(Banners::IsActive).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Banners::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Banners::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_banners_placement")
          .table(Banners::Table)
          .col(Banners::Placement)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Banners::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Banners {
  Table,
  Id,
  Title,
  Placement,
  Content,
  Position,
  IsActive,
  CreatedAt,
  UpdatedAt,
}
