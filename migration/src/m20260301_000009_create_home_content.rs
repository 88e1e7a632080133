use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(HomeContent::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(HomeContent::Id)
              .integer()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(HomeContent::HeroTitle).string().not_null())
          .col(ColumnDef::new(HomeContent::HeroSubtitle).string().not_null())
          .col(ColumnDef::new(HomeContent::Sections).json().not_null())
          .col(ColumnDef::new(HomeContent::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(HomeContent::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum HomeContent {
  Table,
  Id,
  HeroTitle,
  HeroSubtitle,
  Sections,
  UpdatedAt,
}
