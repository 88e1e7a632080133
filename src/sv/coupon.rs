use serde::Deserialize;

use crate::{entity::coupon, prelude::*};

#[derive(Debug, Deserialize)]
pub struct CouponForm {
  pub code: String,
  pub percent: Option<i32>,
  /// Cents; wins over `percent` when both are set
  pub amount: Option<i64>,
  pub starts_at: Option<DateTime>,
  pub expires_at: Option<DateTime>,
  pub max_uses: Option<i32>,
}

pub struct Coupon<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Coupon<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn all(&self) -> Result<Vec<coupon::Model>> {
    let coupons = coupon::Entity::find()
      .order_by_desc(coupon::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(coupons)
  }

  pub async fn create(&self, form: CouponForm) -> Result<coupon::Model> {
    let code = utils::required("code", &form.code)?.to_ascii_uppercase();

    if form.amount.is_none()
      && !form.percent.is_some_and(|p| (1..=100).contains(&p))
    {
      return Err(Error::validation(
        "coupon needs an amount or a percent within 1..=100",
      ));
    }

    if coupon::Entity::find()
      .filter(coupon::Column::Code.eq(&code))
      .one(self.db)
      .await?
      .is_some()
    {
      return Err(Error::validation("coupon code already exists"));
    }

    let coupon = coupon::ActiveModel {
      id: NotSet,
      code: Set(code),
      percent: Set(form.percent),
      amount: Set(form.amount),
      starts_at: Set(form.starts_at),
      expires_at: Set(form.expires_at),
      max_uses: Set(form.max_uses),
      used: Set(0),
      is_active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(coupon.insert(self.db).await?)
  }

  pub async fn set_active(&self, id: i32, is_active: bool) -> Result<()> {
    let coupon = coupon::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(CouponError::NotFound)?;

    coupon::ActiveModel { is_active: Set(is_active), ..coupon.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let coupon = coupon::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(CouponError::NotFound)?;

    coupon::Entity::delete_by_id(coupon.id).exec(self.db).await?;
    Ok(())
  }

  /// Looks up a redeemable coupon, rejecting inactive, out-of-window
  /// and exhausted codes.
  pub async fn validate(&self, code: &str) -> Result<coupon::Model> {
    let code = code.trim().to_ascii_uppercase();

    let coupon = coupon::Entity::find()
      .filter(coupon::Column::Code.eq(&code))
      .one(self.db)
      .await?
      .ok_or(CouponError::NotFound)?;

    let now = Utc::now().naive_utc();
    let started = coupon.starts_at.is_none_or(|at| at <= now);
    let expired = coupon.expires_at.is_some_and(|at| at < now);

    if !coupon.is_active || !started || expired {
      return Err(CouponError::Inactive.into());
    }

    if coupon.max_uses.is_some_and(|max| coupon.used >= max) {
      return Err(CouponError::Exhausted.into());
    }

    Ok(coupon)
  }
}

/// Discount in cents a coupon takes off a subtotal, capped at the
/// subtotal itself.
pub fn discount_for(coupon: &coupon::Model, subtotal: i64) -> i64 {
  let discount = match (coupon.amount, coupon.percent) {
    (Some(amount), _) => amount,
    (None, Some(percent)) => utils::percent_of(subtotal, percent as i64),
    (None, None) => 0,
  };

  discount.clamp(0, subtotal)
}
