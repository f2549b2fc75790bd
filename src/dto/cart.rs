use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Cart, Item, User};

/// Upper bound for a single add and for the merged quantity of one cart line.
pub const MAX_LINE_QUANTITY: i32 = 1_000_000;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    pub item_id: i32,
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "quantity must be between 1 and 1000000"
    ))]
    #[schema(minimum = 1, maximum = 1000000)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub id: i32,
    pub item: Item,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartWithItems {
    pub cart: Cart,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartOverview {
    pub cart: Cart,
    pub user: User,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartOverviewList {
    pub items: Vec<CartOverview>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn request(quantity: i32) -> AddToCartRequest {
        AddToCartRequest {
            item_id: 1,
            quantity,
        }
    }

    #[test]
    fn quantity_bounds_are_inclusive() {
        assert!(request(1).validate().is_ok());
        assert!(request(MAX_LINE_QUANTITY).validate().is_ok());
    }

    #[test]
    fn quantity_outside_bounds_is_rejected() {
        for quantity in [0, -3, MAX_LINE_QUANTITY + 1, i32::MAX] {
            assert!(request(quantity).validate().is_err(), "{quantity}");
        }
    }
}
