use serde::Deserialize;

use crate::{
  entity::{
    OrderStatus, cart_item, coupon, order, order_item, product,
  },
  prelude::*,
  sv,
};

#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
  pub shipping_method_id: i32,
  pub coupon_code: Option<String>,
  pub recipient: String,
  pub phone: String,
  pub address: String,
}

pub struct Order<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Order<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Turns the user's cart into an order inside one transaction:
  /// stock is decremented, prices and titles are snapshotted, the
  /// coupon use is recorded and the cart is cleared.
  pub async fn checkout(
    &self,
    user_id: i32,
    form: CheckoutForm,
  ) -> Result<order::Model> {
    let recipient = utils::required("recipient", &form.recipient)?.to_string();
    let phone = utils::required("phone", &form.phone)?.to_string();
    let address = utils::required("address", &form.address)?.to_string();

    let method = sv::Shipping::new(self.db).by_id(form.shipping_method_id).await?;
    if !method.is_active {
      return Err(Error::ShippingMethodNotFound);
    }

    let coupon = match form.coupon_code.as_deref().map(str::trim) {
      Some(code) if !code.is_empty() => {
        Some(sv::Coupon::new(self.db).validate(code).await?)
      }
      _ => None,
    };

    let txn = self.db.begin().await?;

    let lines = cart_item::Entity::find()
      .filter(cart_item::Column::UserId.eq(user_id))
      .order_by_asc(cart_item::Column::AddedAt)
      .find_also_related(product::Entity)
      .all(&txn)
      .await?;

    let mut subtotal = 0i64;
    let mut checked = Vec::with_capacity(lines.len());

    for (line, product) in lines {
      let product = product
        .filter(|p| p.is_active)
        .ok_or(Error::ProductNotFound)?;

      if product.stock < line.quantity {
        return Err(Error::OutOfStock(product.title));
      }

      let unit_price = product.effective_price();
      subtotal += unit_price * line.quantity as i64;
      checked.push((line, product, unit_price));
    }

    if checked.is_empty() {
      return Err(Error::EmptyCart);
    }

    let discount = coupon
      .as_ref()
      .map(|coupon| sv::coupon::discount_for(coupon, subtotal))
      .unwrap_or(0);
    let shipping_fee = method.fee_for(subtotal);
    let total = subtotal - discount + shipping_fee;

    let now = Utc::now().naive_utc();
    let order = order::ActiveModel {
      id: NotSet,
      user_id: Set(user_id),
      status: Set(OrderStatus::Pending),
      recipient: Set(recipient),
      phone: Set(phone),
      address: Set(address),
      subtotal: Set(subtotal),
      shipping_fee: Set(shipping_fee),
      discount: Set(discount),
      total: Set(total),
      coupon_code: Set(coupon.as_ref().map(|coupon| coupon.code.clone())),
      shipping_title: Set(method.title),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    for (line, product, unit_price) in checked {
      order_item::ActiveModel {
        id: NotSet,
        order_id: Set(order.id),
        product_id: Set(product.id),
        title: Set(product.title.clone()),
        unit_price: Set(unit_price),
        quantity: Set(line.quantity),
      }
      .insert(&txn)
      .await?;

      product::ActiveModel {
        stock: Set(product.stock - line.quantity),
        updated_at: Set(now),
        ..product.into()
      }
      .update(&txn)
      .await?;
    }

    if let Some(coupon) = coupon {
      coupon::ActiveModel { used: Set(coupon.used + 1), ..coupon.into() }
        .update(&txn)
        .await?;
    }

    cart_item::Entity::delete_many()
      .filter(cart_item::Column::UserId.eq(user_id))
      .exec(&txn)
      .await?;

    txn.commit().await?;

    info!(order = order.id, user = user_id, total, "Order placed");
    Ok(order)
  }

  pub async fn by_id(&self, id: i32) -> Result<order::Model> {
    order::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::OrderNotFound)
  }

  pub async fn by_user(&self, user_id: i32) -> Result<Vec<order::Model>> {
    let orders = order::Entity::find()
      .filter(order::Column::UserId.eq(user_id))
      .order_by_desc(order::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(orders)
  }

  pub async fn for_user(&self, user_id: i32, id: i32) -> Result<order::Model> {
    order::Entity::find_by_id(id)
      .filter(order::Column::UserId.eq(user_id))
      .one(self.db)
      .await?
      .ok_or(Error::OrderNotFound)
  }

  pub async fn all(
    &self,
    status: Option<OrderStatus>,
  ) -> Result<Vec<order::Model>> {
    let mut find =
      order::Entity::find().order_by_desc(order::Column::CreatedAt);

    if let Some(status) = status {
      find = find.filter(order::Column::Status.eq(status));
    }

    Ok(find.all(self.db).await?)
  }

  pub async fn items(&self, order_id: i32) -> Result<Vec<order_item::Model>> {
    let items = order_item::Entity::find()
      .filter(order_item::Column::OrderId.eq(order_id))
      .all(self.db)
      .await?;
    Ok(items)
  }

  /// Admin status change; no transition guards, any state can be set.
  pub async fn set_status(
    &self,
    id: i32,
    status: OrderStatus,
  ) -> Result<order::Model> {
    let order = order::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::OrderNotFound)?;

    let order = order::ActiveModel { status: Set(status), ..order.into() }
      .update(self.db)
      .await?;

    Ok(order)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(order::Entity::find().count(self.db).await?)
  }

  /// Lifetime revenue in cents, cancelled orders excluded.
  pub async fn revenue(&self) -> Result<i64> {
    use sea_orm::sea_query::Expr;

    // SUM over zero rows yields NULL, hence the nested Option
    let total: Option<Option<i64>> = order::Entity::find()
      .filter(order::Column::Status.ne(OrderStatus::Cancelled))
      .select_only()
      .column_as(Expr::col(order::Column::Total).sum(), "revenue")
      .into_tuple()
      .one(self.db)
      .await?;

    Ok(total.flatten().unwrap_or(0))
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::{
    entity::{self, shipping_method, user},
    sv::{
      Cart, Catalog,
      catalog::ProductForm,
      coupon::{Coupon as CouponSv, CouponForm},
    },
  };

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(entity::prelude::User),
      schema.create_table_from_entity(entity::prelude::Category),
      schema.create_table_from_entity(entity::prelude::Product),
      schema.create_table_from_entity(entity::prelude::ShippingMethod),
      schema.create_table_from_entity(entity::prelude::Coupon),
      schema.create_table_from_entity(entity::prelude::CartItem),
      schema.create_table_from_entity(entity::prelude::Order),
      schema.create_table_from_entity(entity::prelude::OrderItem),
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

  async fn seed_product(
    db: &DatabaseConnection,
    title: &str,
    price: i64,
    stock: i32,
  ) -> i32 {
    Catalog::new(db)
      .create_product(ProductForm {
        title: title.to_string(),
        slug: None,
        description: String::new(),
        price,
        discount_percent: 0,
        stock,
        category_id: None,
      })
      .await
      .unwrap()
      .id
  }

  async fn seed_shipping(
    db: &DatabaseConnection,
    fee: i64,
    free_over: Option<i64>,
  ) -> i32 {
    shipping_method::ActiveModel {
      id: NotSet,
      title: Set("Courier".into()),
      fee: Set(fee),
      free_over: Set(free_over),
      position: Set(0),
      is_active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  fn form(shipping_method_id: i32, coupon_code: Option<&str>) -> CheckoutForm {
    CheckoutForm {
      shipping_method_id,
      coupon_code: coupon_code.map(str::to_string),
      recipient: "Shopper".into(),
      phone: "+1 555 0100".into(),
      address: "1 Main St".into(),
    }
  }

  #[tokio::test]
  async fn test_checkout_totals_with_shipping_fee() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 10).await;
    let shipping = seed_shipping(&db, 500, Some(10_000)).await;

    Cart::new(&db).add(user, product, 2).await.unwrap();

    let order =
      Order::new(&db).checkout(user, form(shipping, None)).await.unwrap();

    // 8000 subtotal is below the 10000 free threshold
    assert_eq!(order.subtotal, 8_000);
    assert_eq!(order.shipping_fee, 500);
    assert_eq!(order.discount, 0);
    assert_eq!(order.total, 8_500);
    assert_eq!(order.shipping_title, "Courier");
  }

  #[tokio::test]
  async fn test_checkout_free_shipping_over_threshold() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 10).await;
    let shipping = seed_shipping(&db, 500, Some(10_000)).await;

    Cart::new(&db).add(user, product, 3).await.unwrap();

    let order =
      Order::new(&db).checkout(user, form(shipping, None)).await.unwrap();

    assert_eq!(order.subtotal, 12_000);
    assert_eq!(order.shipping_fee, 0);
    assert_eq!(order.total, 12_000);
  }

  #[tokio::test]
  async fn test_checkout_percent_coupon() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 3_333, 10).await;
    let shipping = seed_shipping(&db, 500, None).await;

    CouponSv::new(&db)
      .create(CouponForm {
        code: "welcome10".into(),
        percent: Some(10),
        amount: None,
        starts_at: None,
        expires_at: None,
        max_uses: None,
      })
      .await
      .unwrap();

    Cart::new(&db).add(user, product, 1).await.unwrap();

    let order = Order::new(&db)
      .checkout(user, form(shipping, Some("WELCOME10")))
      .await
      .unwrap();

    // 10% of 3333 rounds to 333
    assert_eq!(order.discount, 333);
    assert_eq!(order.total, 3_333 - 333 + 500);
    assert_eq!(order.coupon_code.as_deref(), Some("WELCOME10"));
  }

  #[tokio::test]
  async fn test_flat_coupon_capped_at_subtotal() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Coaster", 200, 10).await;
    let shipping = seed_shipping(&db, 0, None).await;

    CouponSv::new(&db)
      .create(CouponForm {
        code: "BIG".into(),
        percent: None,
        amount: Some(1_000),
        starts_at: None,
        expires_at: None,
        max_uses: None,
      })
      .await
      .unwrap();

    Cart::new(&db).add(user, product, 1).await.unwrap();

    let order = Order::new(&db)
      .checkout(user, form(shipping, Some("BIG")))
      .await
      .unwrap();

    assert_eq!(order.discount, 200);
    assert_eq!(order.total, 0);
  }

  #[tokio::test]
  async fn test_checkout_decrements_stock_and_clears_cart() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 5).await;
    let shipping = seed_shipping(&db, 500, None).await;

    Cart::new(&db).add(user, product, 3).await.unwrap();
    Order::new(&db).checkout(user, form(shipping, None)).await.unwrap();

    assert_eq!(Catalog::new(&db).by_id(product).await.unwrap().stock, 2);
    assert!(Cart::new(&db).items(user).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_checkout_insufficient_stock() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 2).await;
    let shipping = seed_shipping(&db, 500, None).await;

    Cart::new(&db).add(user, product, 3).await.unwrap();

    assert!(matches!(
      Order::new(&db).checkout(user, form(shipping, None)).await,
      Err(Error::OutOfStock(_))
    ));

    // Nothing committed
    assert_eq!(Catalog::new(&db).by_id(product).await.unwrap().stock, 2);
  }

  #[tokio::test]
  async fn test_checkout_empty_cart() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let shipping = seed_shipping(&db, 500, None).await;

    assert!(matches!(
      Order::new(&db).checkout(user, form(shipping, None)).await,
      Err(Error::EmptyCart)
    ));
  }

  #[tokio::test]
  async fn test_coupon_usage_limit() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 10).await;
    let shipping = seed_shipping(&db, 0, None).await;

    CouponSv::new(&db)
      .create(CouponForm {
        code: "ONCE".into(),
        percent: Some(5),
        amount: None,
        starts_at: None,
        expires_at: None,
        max_uses: Some(1),
      })
      .await
      .unwrap();

    Cart::new(&db).add(user, product, 1).await.unwrap();
    Order::new(&db).checkout(user, form(shipping, Some("ONCE"))).await.unwrap();

    Cart::new(&db).add(user, product, 1).await.unwrap();
    assert!(matches!(
      Order::new(&db).checkout(user, form(shipping, Some("ONCE"))).await,
      Err(Error::Coupon(CouponError::Exhausted))
    ));
  }

  #[tokio::test]
  async fn test_set_status_direct() {
    let db = setup_test_db().await;
    let user = seed_user(&db).await;
    let product = seed_product(&db, "Teapot", 4_000, 10).await;
    let shipping = seed_shipping(&db, 0, None).await;

    Cart::new(&db).add(user, product, 1).await.unwrap();
    let order =
      Order::new(&db).checkout(user, form(shipping, None)).await.unwrap();

    let updated = Order::new(&db)
      .set_status(order.id, OrderStatus::Shipped)
      .await
      .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
  }
}
