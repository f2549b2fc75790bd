use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Item, Order};

/// A purchased line. `price` is the unit price frozen at checkout.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLine {
    pub id: i32,
    pub item: Item,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithItems>,
}
