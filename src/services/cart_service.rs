use std::collections::HashMap;

use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use validator::Validate;

use crate::{
    dto::cart::{
        AddToCartRequest, CartLine, CartOverview, CartOverviewList, CartWithItems,
        MAX_LINE_QUANTITY,
    },
    entity::{
        CartItems, Carts, Items, Users,
        cart_items::{ActiveModel as CartItemActive, Column as CartItemCol, Model as CartItemModel},
        carts::{ActiveModel as CartActive, Column as CartCol, Model as CartModel},
        timestamp,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Add `quantity` of an item to the caller's cart, creating the cart on first
/// use. Adding an item already in the cart bumps its quantity.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let line = match add_line(&txn, user.user_id, payload.item_id, payload.quantity).await {
        Ok(line) => line,
        Err(err) => {
            txn.rollback().await?;
            return Err(err);
        }
    };
    txn.commit().await?;

    tracing::info!(
        user_id = user.user_id,
        item_id = payload.item_id,
        quantity = line.quantity,
        "cart updated"
    );
    Ok(ApiResponse::ok("Item added to cart", CartItem::from(line)))
}

async fn add_line(
    txn: &DatabaseTransaction,
    user_id: i32,
    item_id: i32,
    quantity: i32,
) -> AppResult<CartItemModel> {
    if Items::find_by_id(item_id).one(txn).await?.is_none() {
        return Err(AppError::not_found("Item"));
    }

    let cart = find_or_create_cart(txn, user_id).await?;

    // The (cart_id, item_id) unique index turns a concurrent duplicate insert
    // into an increment instead of a second row. The increment is skipped,
    // affecting no row, when it would push the line past MAX_LINE_QUANTITY.
    let quantity_col = Expr::col((CartItems, CartItemCol::Quantity));
    let affected = CartItems::insert(CartItemActive {
        id: NotSet,
        cart_id: Set(cart.id),
        item_id: Set(item_id),
        quantity: Set(quantity),
    })
    .on_conflict(
        OnConflict::columns([CartItemCol::CartId, CartItemCol::ItemId])
            .value(CartItemCol::Quantity, quantity_col.clone().add(quantity))
            .action_and_where(quantity_col.lte(MAX_LINE_QUANTITY - quantity))
            .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;

    if affected == 0 {
        return Err(AppError::BadRequest(format!(
            "quantity in cart cannot exceed {MAX_LINE_QUANTITY}"
        )));
    }

    CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .filter(CartItemCol::ItemId.eq(item_id))
        .one(txn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("cart line missing after upsert")))
}

async fn find_or_create_cart<C: ConnectionTrait>(conn: &C, user_id: i32) -> AppResult<CartModel> {
    if let Some(cart) = find_cart(conn, user_id).await? {
        return Ok(cart);
    }

    let now = timestamp();
    Carts::insert(CartActive {
        id: NotSet,
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(OnConflict::column(CartCol::UserId).do_nothing().to_owned())
    .exec_without_returning(conn)
    .await?;

    find_cart(conn, user_id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("cart missing after insert")))
}

async fn find_cart<C: ConnectionTrait>(conn: &C, user_id: i32) -> AppResult<Option<CartModel>> {
    let cart = Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .one(conn)
        .await?;
    Ok(cart)
}

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartWithItems>> {
    let cart = find_cart(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart"))?;

    let mut lines = cart_lines(&state.orm, vec![cart.id]).await?;
    let items = lines.remove(&cart.id).unwrap_or_default();

    Ok(ApiResponse::ok(
        "OK",
        CartWithItems {
            cart: cart.into(),
            items,
        },
    ))
}

/// Every cart in the system with its owner and lines, oldest cart first.
pub async fn list_carts(state: &AppState) -> AppResult<ApiResponse<CartOverviewList>> {
    let carts = Carts::find()
        .order_by_asc(CartCol::Id)
        .find_also_related(Users)
        .all(&state.orm)
        .await?;

    let mut lines = cart_lines(&state.orm, carts.iter().map(|(c, _)| c.id).collect()).await?;

    let mut items = Vec::with_capacity(carts.len());
    for (cart, owner) in carts {
        let owner = owner.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("cart {} has no owner", cart.id))
        })?;
        items.push(CartOverview {
            items: lines.remove(&cart.id).unwrap_or_default(),
            user: User::from(owner),
            cart: cart.into(),
        });
    }

    let meta = Meta::listing(items.len());
    Ok(ApiResponse::with_meta("Carts", CartOverviewList { items }, meta))
}

/// Lines of the given carts with their items resolved, keyed by cart id.
async fn cart_lines<C: ConnectionTrait>(
    conn: &C,
    cart_ids: Vec<i32>,
) -> AppResult<HashMap<i32, Vec<CartLine>>> {
    let mut by_cart: HashMap<i32, Vec<CartLine>> = HashMap::new();
    if cart_ids.is_empty() {
        return Ok(by_cart);
    }

    let rows = CartItems::find()
        .filter(CartItemCol::CartId.is_in(cart_ids))
        .order_by_asc(CartItemCol::Id)
        .find_also_related(Items)
        .all(conn)
        .await?;

    for (line, item) in rows {
        let item = item.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("cart line {} references a missing item", line.id))
        })?;
        by_cart.entry(line.cart_id).or_default().push(CartLine {
            id: line.id,
            item: item.into(),
            quantity: line.quantity,
        });
    }
    Ok(by_cart)
}
