//! Database migrations for the storefront

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_categories;
mod m20260301_000003_create_products;
mod m20260301_000004_create_shipping_methods;
mod m20260301_000005_create_coupons;
mod m20260301_000006_create_cart_items;
mod m20260301_000007_create_orders;
mod m20260301_000008_create_pages;
mod m20260301_000009_create_home_content;
mod m20260301_000010_create_contacts;
mod m20260301_000011_create_product_requests;
mod m20260301_000012_create_banners;
mod m20260312_000013_create_page_views;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260301_000001_create_users::Migration),
      Box::new(m20260301_000002_create_categories::Migration),
      Box::new(m20260301_000003_create_products::Migration),
      Box::new(m20260301_000004_create_shipping_methods::Migration),
      Box::new(m20260301_000005_create_coupons::Migration),
      Box::new(m20260301_000006_create_cart_items::Migration),
      Box::new(m20260301_000007_create_orders::Migration),
      Box::new(m20260301_000008_create_pages::Migration),
      Box::new(m20260301_000009_create_home_content::Migration),
      Box::new(m20260301_000010_create_contacts::Migration),
      Box::new(m20260301_000011_create_product_requests::Migration),
      Box::new(m20260301_000012_create_banners::Migration),
      Box::new(m20260312_000013_create_page_views::Migration),
    ]
  }
}
