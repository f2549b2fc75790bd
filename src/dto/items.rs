use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Item;

#[derive(Serialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<Item>,
}
