use serde::Serialize;

use crate::{
  entity::{product, review},
  prelude::*,
};

#[derive(Debug, Serialize)]
pub struct ProductReviews {
  pub items: Vec<review::Model>,
  pub average_rating: Option<f64>,
}

pub struct Review<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Review<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn approved_for(&self, product_id: i32) -> Result<ProductReviews> {
    let items = review::Entity::find()
      .filter(review::Column::ProductId.eq(product_id))
      .filter(review::Column::IsApproved.eq(true))
      .order_by_desc(review::Column::CreatedAt)
      .all(self.db)
      .await?;

    let average_rating = (!items.is_empty()).then(|| {
      items.iter().map(|review| review.rating as f64).sum::<f64>()
        / items.len() as f64
    });

    Ok(ProductReviews { items, average_rating })
  }

  /// New reviews land unapproved and wait for moderation.
  pub async fn submit(
    &self,
    user_id: i32,
    product_id: i32,
    rating: i32,
    body: String,
  ) -> Result<review::Model> {
    if !(1..=5).contains(&rating) {
      return Err(Error::validation("rating must be within 1..=5"));
    }

    product::Entity::find_by_id(product_id)
      .one(self.db)
      .await?
      .filter(|product| product.is_active)
      .ok_or(Error::ProductNotFound)?;

    let existing = review::Entity::find()
      .filter(review::Column::ProductId.eq(product_id))
      .filter(review::Column::UserId.eq(user_id))
      .one(self.db)
      .await?;
    if existing.is_some() {
      return Err(Error::validation("product already reviewed"));
    }

    let review = review::ActiveModel {
      id: NotSet,
      product_id: Set(product_id),
      user_id: Set(user_id),
      rating: Set(rating),
      body: Set(body),
      is_approved: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(review.insert(self.db).await?)
  }

  pub async fn pending(&self) -> Result<Vec<review::Model>> {
    let reviews = review::Entity::find()
      .filter(review::Column::IsApproved.eq(false))
      .order_by_asc(review::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(reviews)
  }

  pub async fn set_approved(&self, id: i32, approved: bool) -> Result<()> {
    let review = review::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ReviewNotFound)?;

    review::ActiveModel { is_approved: Set(approved), ..review.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let review = review::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ReviewNotFound)?;

    review::Entity::delete_by_id(review.id).exec(self.db).await?;
    Ok(())
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
      schema.create_table_from_entity(entity::prelude::Review),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  async fn seed(db: &DatabaseConnection) -> (i32, i32) {
    let user = user::ActiveModel {
      id: NotSet,
      email: Set("shopper@example.com".into()),
      password_hash: Set("x".into()),
      display_name: Set("Shopper".into()),
      is_admin: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap();

    let product = Catalog::new(db)
      .create_product(ProductForm {
        title: "Teapot".into(),
        slug: None,
        description: String::new(),
        price: 4_000,
        discount_percent: 0,
        stock: 10,
        category_id: None,
      })
      .await
      .unwrap();

    (user.id, product.id)
  }

  #[tokio::test]
  async fn test_review_needs_moderation() {
    let db = setup_test_db().await;
    let sv = Review::new(&db);
    let (user, product) = seed(&db).await;

    let review = sv.submit(user, product, 5, "Lovely.".into()).await.unwrap();
    assert!(sv.approved_for(product).await.unwrap().items.is_empty());

    sv.set_approved(review.id, true).await.unwrap();

    let reviews = sv.approved_for(product).await.unwrap();
    assert_eq!(reviews.items.len(), 1);
    assert_eq!(reviews.average_rating, Some(5.0));
  }

  #[tokio::test]
  async fn test_one_review_per_user() {
    let db = setup_test_db().await;
    let sv = Review::new(&db);
    let (user, product) = seed(&db).await;

    sv.submit(user, product, 4, String::new()).await.unwrap();

    assert!(matches!(
      sv.submit(user, product, 2, String::new()).await,
      Err(Error::Validation(_))
    ));
  }

  #[tokio::test]
  async fn test_rating_bounds() {
    let db = setup_test_db().await;
    let sv = Review::new(&db);
    let (user, product) = seed(&db).await;

    assert!(matches!(
      sv.submit(user, product, 6, String::new()).await,
      Err(Error::Validation(_))
    ));
  }
}
