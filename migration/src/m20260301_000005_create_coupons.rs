use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Coupons::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Coupons::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Coupons::Code).string().not_null().unique_key())
          .col(ColumnDef::new(Coupons::Percent).integer().null())
          .col(ColumnDef::new(Coupons::Amount).big_integer().null())
          .col(ColumnDef::new(Coupons::StartsAt).date_time().null())
          .col(ColumnDef::new(Coupons::ExpiresAt).date_time().null())
          .col(ColumnDef::new(Coupons::MaxUses).integer().null())
          .col(ColumnDef::new(Coupons::Used).integer().not_null().default(0))
          .col(
            ColumnDef::new(Coupons::IsActive).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Coupons::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Coupons::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Coupons {
  Table,
  Id,
  Code,
  Percent,
  Amount,
  StartsAt,
  ExpiresAt,
  MaxUses,
  Used,
  IsActive,
  CreatedAt,
}
