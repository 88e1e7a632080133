use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Contacts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Contacts::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Contacts::Name).string().not_null())
          .col(ColumnDef::new(Contacts::Email).string().not_null())
          .col(ColumnDef::new(Contacts::Subject).string().not_null())
          .col(ColumnDef::new(Contacts::Body).text().not_null())
          .col(
            ColumnDef::new(Contacts::IsRead).boolean().not_null().default(false),
          )
          .col(ColumnDef::new(Contacts::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Contacts::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Contacts {
  Table,
  Id,
  Name,
  Email,
  Subject,
  Body,
  IsRead,
  CreatedAt,
}
