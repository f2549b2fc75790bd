pub mod cart_items;
pub mod carts;
pub mod items;
pub mod order_items;
pub mod orders;
pub mod users;

pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use items::Entity as Items;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use users::Entity as Users;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time in the representation the timestamp columns use.
pub fn timestamp() -> DateTimeWithTimeZone {
    Utc::now().into()
}
