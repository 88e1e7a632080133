use serde::Serialize;

use crate::{
  entity::{cart_item, product},
  prelude::*,
};

#[derive(Debug, Serialize)]
pub struct CartLine {
  pub product_id: i32,
  pub slug: String,
  pub title: String,
  /// Sale-aware unit price in cents
  pub unit_price: i64,
  pub quantity: i32,
  pub line_total: i64,
}

#[derive(Debug, Serialize)]
pub struct CartSummary {
  pub lines: Vec<CartLine>,
  pub subtotal: i64,
}

pub struct Cart<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Cart<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn add(
    &self,
    user_id: i32,
    product_id: i32,
    quantity: i32,
  ) -> Result<cart_item::Model> {
    if quantity <= 0 {
      return Err(Error::validation("quantity must be positive"));
    }

    let product = product::Entity::find_by_id(product_id)
      .one(self.db)
      .await?
      .filter(|product| product.is_active)
      .ok_or(Error::ProductNotFound)?;

    if let Some(line) = self.line(user_id, product.id).await? {
      let merged = line.quantity + quantity;
      let line = cart_item::ActiveModel {
        quantity: Set(merged),
        ..line.into()
      };
      return Ok(line.update(self.db).await?);
    }

    let line = cart_item::ActiveModel {
      id: NotSet,
      user_id: Set(user_id),
      product_id: Set(product.id),
      quantity: Set(quantity),
      added_at: Set(Utc::now().naive_utc()),
    };

    Ok(line.insert(self.db).await?)
  }

  pub async fn set_quantity(
    &self,
    user_id: i32,
    product_id: i32,
    quantity: i32,
  ) -> Result<()> {
    if quantity < 0 {
      return Err(Error::validation("quantity must not be negative"));
    }

    let line =
      self.line(user_id, product_id).await?.ok_or(Error::ProductNotFound)?;

    if quantity == 0 {
      cart_item::Entity::delete_by_id(line.id).exec(self.db).await?;
      return Ok(());
    }

    cart_item::ActiveModel { quantity: Set(quantity), ..line.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn remove(&self, user_id: i32, product_id: i32) -> Result<()> {
    let line =
      self.line(user_id, product_id).await?.ok_or(Error::ProductNotFound)?;

    cart_item::Entity::delete_by_id(line.id).exec(self.db).await?;
    Ok(())
  }

  pub async fn clear(&self, user_id: i32) -> Result<()> {
    cart_item::Entity::delete_many()
      .filter(cart_item::Column::UserId.eq(user_id))
      .exec(self.db)
      .await?;
    Ok(())
  }

  /// Cart lines joined with their live products. Lines whose product
  /// vanished or was deactivated are skipped, not surfaced as errors.
  pub async fn items(
    &self,
    user_id: i32,
  ) -> Result<Vec<(cart_item::Model, product::Model)>> {
    let lines = cart_item::Entity::find()
      .filter(cart_item::Column::UserId.eq(user_id))
      .order_by_asc(cart_item::Column::AddedAt)
      .find_also_related(product::Entity)
      .all(self.db)
      .await?;

    Ok(
      lines
        .into_iter()
        .filter_map(|(line, product)| {
          product.filter(|p| p.is_active).map(|p| (line, p))
        })
        .collect(),
    )
  }

  pub async fn summary(&self, user_id: i32) -> Result<CartSummary> {
    let lines: Vec<CartLine> = self
      .items(user_id)
      .await?
      .into_iter()
      .map(|(line, product)| {
        let unit_price = product.effective_price();
        CartLine {
          product_id: product.id,
          slug: product.slug,
          title: product.title,
          unit_price,
          quantity: line.quantity,
          line_total: unit_price * line.quantity as i64,
        }
      })
      .collect();

    let subtotal = lines.iter().map(|line| line.line_total).sum();

    Ok(CartSummary { lines, subtotal })
  }

  async fn line(
    &self,
    user_id: i32,
    product_id: i32,
  ) -> Result<Option<cart_item::Model>> {
    let line = cart_item::Entity::find()
      .filter(cart_item::Column::UserId.eq(user_id))
      .filter(cart_item::Column::ProductId.eq(product_id))
      .one(self.db)
      .await?;
    Ok(line)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::{
    entity::{self, user},
    sv::catalog::{Catalog, ProductForm},
  };

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(entity::prelude::User),
      schema.create_table_from_entity(entity::prelude::Category),
      schema.create_table_from_entity(entity::prelude::Product),
      schema.create_table_from_entity(entity::prelude::CartItem),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  async fn seed_user(db: &DatabaseConnection) -> i32 {
    user::ActiveModel {
      id: NotSet,
      email: Set("shopper@example.com".into()),
      password_hash: Set("x".into()),
      display_name: Set("Shopper".into()),
      is_admin: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  async fn seed_product(db: &DatabaseConnection, title: &str, price: i64, percent: i32) -> i32 {
    Catalog::new(db)
      .create_product(ProductForm {
        title: title.to_string(),
        slug: None,
        description: String::new(),
        price,
        discount_percent: percent,
        stock: 100,
        category_id: None,
      })
      .await
      .unwrap()
      .id
  }

  #[tokio::test]
  async fn test_add_merges_quantities() {
    let db = setup_test_db().await;
    let sv = Cart::new(&db);
    let user = seed_user(&db).await;
    let product_id = seed_product(&db, "Candle", 1_500, 0).await;

    sv.add(user, product_id, 2).await.unwrap();
    let line = sv.add(user, product_id, 3).await.unwrap();

    assert_eq!(line.quantity, 5);
    assert_eq!(sv.items(user).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_zero_quantity_removes_line() {
    let db = setup_test_db().await;
    let sv = Cart::new(&db);
    let user = seed_user(&db).await;
    let product_id = seed_product(&db, "Candle", 1_500, 0).await;

    sv.add(user, product_id, 2).await.unwrap();
    sv.set_quantity(user, product_id, 0).await.unwrap();

    assert!(sv.items(user).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_summary_uses_sale_price() {
    let db = setup_test_db().await;
    let sv = Cart::new(&db);
    let user = seed_user(&db).await;

    let candle = seed_product(&db, "Candle", 1_000, 0).await;
    let teapot = seed_product(&db, "Teapot", 4_000, 25).await;

    sv.add(user, candle, 2).await.unwrap();
    sv.add(user, teapot, 1).await.unwrap();

    let summary = sv.summary(user).await.unwrap();
    // 2 x 1000 + 1 x 3000 (25% off 4000)
    assert_eq!(summary.subtotal, 5_000);
  }

  #[tokio::test]
  async fn test_inactive_product_rejected() {
    let db = setup_test_db().await;
    let sv = Cart::new(&db);
    let catalog = Catalog::new(&db);
    let user = seed_user(&db).await;

    let product_id = seed_product(&db, "Mirror", 9_000, 0).await;
    catalog.delete_product(product_id).await.unwrap();

    assert!(matches!(
      sv.add(user, product_id, 1).await,
      Err(Error::ProductNotFound)
    ));
  }
}
