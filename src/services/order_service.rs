use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::LockType,
};

use crate::{
    dto::orders::{OrderLine, OrderList, OrderWithItems},
    entity::{
        CartItems, Carts, Items, OrderItems, Orders,
        cart_items::Column as CartItemCol,
        carts::Column as CartCol,
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel},
        timestamp,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Status of every freshly placed order.
pub const STATUS_PENDING: &str = "pending";

/// Turn the caller's cart into a pending order.
///
/// Runs in a single transaction. On any failure nothing is written and the
/// cart is left as it was.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let txn = state.orm.begin().await?;
    let order = match place_order(&txn, user.user_id).await {
        Ok(order) => order,
        Err(err) => {
            txn.rollback().await?;
            return Err(err);
        }
    };
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        order_id = order.id,
        total = order.total,
        "order created"
    );

    let order = order_details(&state.orm, vec![order])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("created order vanished")))?;

    Ok(ApiResponse::ok("Order created successfully", order))
}

async fn place_order(txn: &DatabaseTransaction, user_id: i32) -> AppResult<OrderModel> {
    let cart = Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::not_found("Cart"))?;

    let rows = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .order_by_asc(CartItemCol::Id)
        .find_also_related(Items)
        .all(txn)
        .await?;

    if rows.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    // (item_id, quantity, unit price as read now)
    let mut lines: Vec<(i32, i32, f64)> = Vec::with_capacity(rows.len());
    for (line, item) in rows {
        let item = item.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("cart line {} references a missing item", line.id))
        })?;
        lines.push((line.item_id, line.quantity, item.price));
    }

    let total = order_total(lines.iter().map(|&(_, quantity, price)| (quantity, price)));
    let now = timestamp();

    let order = OrderActive {
        id: NotSet,
        user_id: Set(user_id),
        total: Set(total),
        status: Set(STATUS_PENDING.into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;

    for &(item_id, quantity, price) in &lines {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            item_id: Set(item_id),
            quantity: Set(quantity),
            price: Set(price),
        }
        .insert(txn)
        .await?;
    }

    CartItems::delete_many()
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(txn)
        .await?;
    Carts::delete_by_id(cart.id).exec(txn).await?;

    Ok(order)
}

/// Sum of `quantity × unit price` over `(quantity, price)` pairs.
pub fn order_total(lines: impl IntoIterator<Item = (i32, f64)>) -> f64 {
    lines
        .into_iter()
        .map(|(quantity, price)| price * f64::from(quantity))
        .sum()
}

/// The caller's orders, newest first.
pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?;

    let items = order_details(&state.orm, orders).await?;
    let meta = Meta::listing(items.len());
    Ok(ApiResponse::with_meta("Ok", OrderList { items }, meta))
}

/// Attach lines and resolved items to each order, keeping the input order.
async fn order_details<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<OrderWithItems>> {
    let mut by_order: HashMap<i32, Vec<OrderLine>> = HashMap::new();
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

    if !ids.is_empty() {
        let rows = OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(ids))
            .order_by_asc(OrderItemCol::Id)
            .find_also_related(Items)
            .all(conn)
            .await?;

        for (line, item) in rows {
            let item = item.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "order line {} references a missing item",
                    line.id
                ))
            })?;
            by_order.entry(line.order_id).or_default().push(OrderLine {
                id: line.id,
                item: item.into(),
                quantity: line.quantity,
                price: line.price,
            });
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: by_order.remove(&order.id).unwrap_or_default(),
            order: order.into(),
        })
        .collect())
}
