//! Entity prelude for convenient imports

pub use super::banner::Entity as Banner;
pub use super::cart_item::Entity as CartItem;
pub use super::category::Entity as Category;
pub use super::contact::Entity as Contact;
pub use super::coupon::Entity as Coupon;
pub use super::home_content::Entity as HomeContent;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::page::Entity as Page;
pub use super::page_view::Entity as PageView;
pub use super::product::Entity as Product;
pub use super::product_request::Entity as ProductRequest;
pub use super::review::Entity as Review;
pub use super::shipping_method::Entity as ShippingMethod;
pub use super::user::Entity as User;
