pub mod analytics;
pub mod banner;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod coupon;
pub mod order;
pub mod page;
pub mod request;
pub mod review;
pub mod shipping;
pub mod user;

pub use analytics::Analytics;
pub use banner::Banner;
pub use cart::Cart;
pub use catalog::Catalog;
pub use contact::Contact;
pub use coupon::Coupon;
pub use order::Order;
pub use page::Page;
pub use request::Request;
pub use review::Review;
pub use shipping::Shipping;
pub use user::User;
