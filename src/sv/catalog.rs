use serde::{Deserialize, Serialize};

use crate::{
  entity::{category, product},
  prelude::*,
};

#[derive(Debug, Deserialize)]
pub struct ProductForm {
  pub title: String,
  pub slug: Option<String>,
  #[serde(default)]
  pub description: String,
  /// Cents
  pub price: i64,
  #[serde(default)]
  pub discount_percent: i32,
  #[serde(default)]
  pub stock: i32,
  pub category_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
  pub title: Option<String>,
  pub description: Option<String>,
  pub price: Option<i64>,
  pub discount_percent: Option<i32>,
  pub stock: Option<i32>,
  pub is_active: Option<bool>,
  pub category_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
  pub category: Option<String>,
  pub q: Option<String>,
  pub page: Option<u64>,
  pub per_page: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ProductListing {
  pub items: Vec<product::Model>,
  pub total: u64,
  pub page: u64,
  pub per_page: u64,
}

/// Sale price derived from the discount slider; `None` clears the sale.
pub fn sale_price(price: i64, percent: i32) -> Option<i64> {
  (1..=100)
    .contains(&percent)
    .then(|| utils::percent_of(price, (100 - percent) as i64))
}

/// Inverse of [`sale_price`], recovering the slider position.
#[allow(dead_code)]
pub fn discount_percent(price: i64, sale: i64) -> i32 {
  if price <= 0 {
    return 0;
  }
  (((price - sale) * 100 + price / 2) / price) as i32
}

pub struct Catalog<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Catalog<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn list(&self, query: &ProductQuery) -> Result<ProductListing> {
    let mut find = product::Entity::find()
      .filter(product::Column::IsActive.eq(true))
      .order_by_desc(product::Column::CreatedAt);

    if let Some(slug) = query.category.as_deref() {
      let category = self.category_by_slug(slug).await?;
      find = find.filter(product::Column::CategoryId.eq(category.id));
    }

    if let Some(q) =
      query.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    {
      find = find.filter(product::Column::Title.contains(q));
    }

    let per_page = query.per_page.unwrap_or(24).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let paginator = find.paginate(self.db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(ProductListing { items, total, page, per_page })
  }

  pub async fn by_slug(&self, slug: &str) -> Result<product::Model> {
    product::Entity::find()
      .filter(product::Column::Slug.eq(slug))
      .filter(product::Column::IsActive.eq(true))
      .one(self.db)
      .await?
      .ok_or(Error::ProductNotFound)
  }

  pub async fn by_id(&self, id: i32) -> Result<product::Model> {
    product::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ProductNotFound)
  }

  pub async fn create_product(
    &self,
    form: ProductForm,
  ) -> Result<product::Model> {
    let title = utils::required("title", &form.title)?.to_string();
    validate_pricing(form.price, form.discount_percent)?;

    let base = match form.slug.as_deref().map(str::trim) {
      Some(slug) if !slug.is_empty() => utils::slugify(slug),
      _ => utils::slugify(&title),
    };
    let slug = self.unique_slug(&base).await?;

    let now = Utc::now().naive_utc();
    let product = product::ActiveModel {
      id: NotSet,
      slug: Set(slug),
      title: Set(title),
      description: Set(form.description),
      price: Set(form.price),
      discount_percent: Set(form.discount_percent),
      sale_price: Set(sale_price(form.price, form.discount_percent)),
      stock: Set(form.stock.max(0)),
      is_active: Set(true),
      category_id: Set(form.category_id),
      created_at: Set(now),
      updated_at: Set(now),
    };

    Ok(product.insert(self.db).await?)
  }

  pub async fn update_product(
    &self,
    id: i32,
    patch: ProductPatch,
  ) -> Result<product::Model> {
    let product = self.by_id(id).await?;

    let price = patch.price.unwrap_or(product.price);
    let percent = patch.discount_percent.unwrap_or(product.discount_percent);
    validate_pricing(price, percent)?;

    let mut active: product::ActiveModel = product.into();

    if let Some(title) = patch.title {
      active.title = Set(utils::required("title", &title)?.to_string());
    }
    if let Some(description) = patch.description {
      active.description = Set(description);
    }
    if let Some(stock) = patch.stock {
      active.stock = Set(stock.max(0));
    }
    if let Some(is_active) = patch.is_active {
      active.is_active = Set(is_active);
    }
    if let Some(category_id) = patch.category_id {
      active.category_id = Set(Some(category_id));
    }

    // Sale price is derived, never stored independently
    active.price = Set(price);
    active.discount_percent = Set(percent);
    active.sale_price = Set(sale_price(price, percent));
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }

  pub async fn delete_product(&self, id: i32) -> Result<()> {
    let product = self.by_id(id).await?;

    // Soft delete keeps order history intact
    product::ActiveModel {
      is_active: Set(false),
      updated_at: Set(Utc::now().naive_utc()),
      ..product.into()
    }
    .update(self.db)
    .await?;

    Ok(())
  }

  pub async fn count_products(&self) -> Result<u64> {
    Ok(
      product::Entity::find()
        .filter(product::Column::IsActive.eq(true))
        .count(self.db)
        .await?,
    )
  }

  pub async fn categories(&self, all: bool) -> Result<Vec<category::Model>> {
    let mut find =
      category::Entity::find().order_by_asc(category::Column::Position);

    if !all {
      find = find.filter(category::Column::IsActive.eq(true));
    }

    Ok(find.all(self.db).await?)
  }

  pub async fn category_by_slug(&self, slug: &str) -> Result<category::Model> {
    category::Entity::find()
      .filter(category::Column::Slug.eq(slug))
      .one(self.db)
      .await?
      .ok_or(Error::CategoryNotFound)
  }

  pub async fn create_category(
    &self,
    title: &str,
    position: i32,
  ) -> Result<category::Model> {
    let title = utils::required("title", title)?;
    let slug = utils::slugify(title);

    if category::Entity::find()
      .filter(category::Column::Slug.eq(&slug))
      .one(self.db)
      .await?
      .is_some()
    {
      return Err(Error::validation("category already exists"));
    }

    let category = category::ActiveModel {
      id: NotSet,
      slug: Set(slug),
      title: Set(title.to_string()),
      position: Set(position),
      is_active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(category.insert(self.db).await?)
  }

  pub async fn update_category(
    &self,
    id: i32,
    title: Option<String>,
    position: Option<i32>,
    is_active: Option<bool>,
  ) -> Result<category::Model> {
    let category = category::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::CategoryNotFound)?;

    let mut active: category::ActiveModel = category.into();

    if let Some(title) = title {
      active.title = Set(utils::required("title", &title)?.to_string());
    }
    if let Some(position) = position {
      active.position = Set(position);
    }
    if let Some(is_active) = is_active {
      active.is_active = Set(is_active);
    }

    Ok(active.update(self.db).await?)
  }

  pub async fn delete_category(&self, id: i32) -> Result<()> {
    let category = category::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::CategoryNotFound)?;

    category::Entity::delete_by_id(category.id).exec(self.db).await?;
    Ok(())
  }

  async fn unique_slug(&self, base: &str) -> Result<String> {
    let base = if base.is_empty() { "item".to_string() } else { base.into() };

    let mut slug = base.clone();
    let mut suffix = 2;

    while product::Entity::find()
      .filter(product::Column::Slug.eq(&slug))
      .one(self.db)
      .await?
      .is_some()
    {
      slug = format!("{base}-{suffix}");
      suffix += 1;
    }

    Ok(slug)
  }
}

fn validate_pricing(price: i64, percent: i32) -> Result<()> {
  if price <= 0 {
    return Err(Error::validation("price must be positive"));
  }
  if !(0..=100).contains(&percent) {
    return Err(Error::validation("discount percent must be within 0..=100"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::entity;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(entity::prelude::Category),
      schema.create_table_from_entity(entity::prelude::Product),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  fn form(title: &str, price: i64, percent: i32) -> ProductForm {
    ProductForm {
      title: title.to_string(),
      slug: None,
      description: String::new(),
      price,
      discount_percent: percent,
      stock: 10,
      category_id: None,
    }
  }

  #[test]
  fn test_sale_price_roundtrip() {
    assert_eq!(sale_price(10_000, 25), Some(7500));
    assert_eq!(sale_price(9_999, 10), Some(8999));
    assert_eq!(sale_price(10_000, 0), None);

    assert_eq!(discount_percent(10_000, 7500), 25);
    assert_eq!(discount_percent(9_999, 8999), 10);
  }

  #[tokio::test]
  async fn test_create_derives_sale_price() {
    let db = setup_test_db().await;
    let sv = Catalog::new(&db);

    let product = sv.create_product(form("Oak Table", 20_000, 15)).await.unwrap();

    assert_eq!(product.slug, "oak-table");
    assert_eq!(product.sale_price, Some(17_000));
    assert_eq!(product.effective_price(), 17_000);
  }

  #[tokio::test]
  async fn test_slug_collision_gets_suffix() {
    let db = setup_test_db().await;
    let sv = Catalog::new(&db);

    let first = sv.create_product(form("Vase", 1_000, 0)).await.unwrap();
    let second = sv.create_product(form("Vase", 2_000, 0)).await.unwrap();

    assert_eq!(first.slug, "vase");
    assert_eq!(second.slug, "vase-2");
  }

  #[tokio::test]
  async fn test_by_slug_skips_inactive() {
    let db = setup_test_db().await;
    let sv = Catalog::new(&db);

    let product = sv.create_product(form("Lamp", 3_000, 0)).await.unwrap();
    sv.delete_product(product.id).await.unwrap();

    assert!(matches!(sv.by_slug("lamp").await, Err(Error::ProductNotFound)));
  }

  #[tokio::test]
  async fn test_update_recomputes_sale_price() {
    let db = setup_test_db().await;
    let sv = Catalog::new(&db);

    let product = sv.create_product(form("Rug", 5_000, 20)).await.unwrap();
    assert_eq!(product.sale_price, Some(4_000));

    let updated = sv
      .update_product(
        product.id,
        ProductPatch { price: Some(6_000), ..Default::default() },
      )
      .await
      .unwrap();

    assert_eq!(updated.sale_price, Some(4_800));
  }
}
