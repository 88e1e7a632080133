use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ShippingMethods::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ShippingMethods::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(ShippingMethods::Title).string().not_null())
          .col(ColumnDef::new(ShippingMethods::Fee).big_integer().not_null())
          .col(ColumnDef::new(ShippingMethods::FreeOver).big_integer().null())
          .col(
            ColumnDef::new(ShippingMethods::Position)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(ShippingMethods::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(ShippingMethods::CreatedAt).date_time().not_null(),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ShippingMethods::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ShippingMethods {
  Table,
  Id,
  Title,
  Fee,
  FreeOver,
  Position,
  IsActive,
  CreatedAt,
}
