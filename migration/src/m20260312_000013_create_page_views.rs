use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PageViews::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PageViews::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(PageViews::Kind).string().not_null().default("view"),
          )
          .col(ColumnDef::new(PageViews::Path).string().not_null())
          .col(ColumnDef::new(PageViews::Referrer).string().null())
          .col(ColumnDef::new(PageViews::Visitor).string().null())
          .col(ColumnDef::new(PageViews::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_page_views_path")
          .table(PageViews::Table)
          .col(PageViews::Path)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(PageViews::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum PageViews {
  Table,
  Id,
  Kind,
  Path,
  Referrer,
  Visitor,
  CreatedAt,
}
