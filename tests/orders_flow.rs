mod common;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use storefront_api::{
    dto::cart::AddToCartRequest,
    entity::{
        CartItems, Carts, Items, OrderItems, Orders,
        carts::{ActiveModel as CartActive, Column as CartCol},
        items::ActiveModel as ItemActive,
        timestamp,
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::{cart_service, order_service},
    state::AppState,
};

async fn add(state: &AppState, user: &AuthUser, name: &str, quantity: i32) -> anyhow::Result<()> {
    let item_id = common::item_id(state, name).await?;
    cart_service::add_to_cart(state, user, AddToCartRequest { item_id, quantity }).await?;
    Ok(())
}

// Integration flow: fill cart -> checkout -> cart is gone, order carries frozen prices.
#[tokio::test]
async fn checkout_totals_cart_and_consumes_it() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "alice").await?;

    add(&state, &user, "Laptop", 2).await?;
    add(&state, &user, "Mouse", 1).await?;

    let placed = order_service::create_order(&state, &user)
        .await?
        .data
        .unwrap();
    assert!((placed.order.total - 2029.97).abs() < 1e-9);
    assert_eq!(placed.order.status, order_service::STATUS_PENDING);
    assert_eq!(placed.order.user_id, user.user_id);

    let lines: Vec<(&str, i32, f64)> = placed
        .items
        .iter()
        .map(|line| (line.item.name.as_str(), line.quantity, line.price))
        .collect();
    assert_eq!(lines, vec![("Laptop", 2, 999.99), ("Mouse", 1, 29.99)]);

    let err = cart_service::get_cart(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(CartItems::find().count(&state.orm).await?, 0);
    assert_eq!(Carts::find().count(&state.orm).await?, 0);

    // A second checkout has nothing to consume.
    let again = order_service::create_order(&state, &user).await.unwrap_err();
    assert!(matches!(again, AppError::NotFound(_)));
    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn checkout_without_cart_is_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "bob").await?;

    let err = order_service::create_order(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Cart not found"));
    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn checkout_of_empty_cart_is_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "carol").await?;

    let now = timestamp();
    CartActive {
        user_id: Set(user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    let err = order_service::create_order(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Cart is empty"));
    assert_eq!(Orders::find().count(&state.orm).await?, 0);

    // The empty cart is left untouched.
    let carts = Carts::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(carts, 1);
    Ok(())
}

#[tokio::test]
async fn catalog_price_change_does_not_touch_existing_orders() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "dave").await?;
    add(&state, &user, "Keyboard", 3).await?;

    let placed = order_service::create_order(&state, &user)
        .await?
        .data
        .unwrap();
    let total_before = placed.order.total;

    let keyboard_id = common::item_id(&state, "Keyboard").await?;
    let keyboard = Items::find_by_id(keyboard_id).one(&state.orm).await?.unwrap();
    let mut active: ItemActive = keyboard.into();
    active.price = Set(149.5);
    active.update(&state.orm).await?;

    let orders = order_service::list_orders(&state, &user)
        .await?
        .data
        .unwrap()
        .items;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order.total, total_before);
    assert_eq!(orders[0].items[0].price, 79.99);
    // The resolved item shows today's catalog entry; the line keeps its own price.
    assert_eq!(orders[0].items[0].item.price, 149.5);
    Ok(())
}

#[tokio::test]
async fn orders_are_listed_newest_first_and_scoped_to_user() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "erin").await?;
    let other = common::auth_user(&state, "frank").await?;

    add(&state, &user, "Mouse", 1).await?;
    let first = order_service::create_order(&state, &user).await?.data.unwrap();
    add(&state, &user, "Monitor", 1).await?;
    let second = order_service::create_order(&state, &user).await?.data.unwrap();
    add(&state, &other, "Headphones", 1).await?;
    order_service::create_order(&state, &other).await?;

    let ids: Vec<i32> = order_service::list_orders(&state, &user)
        .await?
        .data
        .unwrap()
        .items
        .iter()
        .map(|o| o.order.id)
        .collect();
    assert_eq!(ids, vec![second.order.id, first.order.id]);
    Ok(())
}

#[tokio::test]
async fn failure_during_cart_teardown_rolls_back_the_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::auth_user(&state, "grace").await?;
    add(&state, &user, "Laptop", 1).await?;
    add(&state, &user, "Mouse", 2).await?;

    // Fail after the order and its lines are written, when the cart row is deleted.
    state
        .orm
        .execute_unprepared(
            "CREATE TRIGGER fail_cart_delete BEFORE DELETE ON carts \
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
        )
        .await?;

    let err = order_service::create_order(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::OrmError(_)));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    assert_eq!(OrderItems::find().count(&state.orm).await?, 0);
    let cart = cart_service::get_cart(&state, &user).await?.data.unwrap();
    let quantities: Vec<i32> = cart.items.iter().map(|line| line.quantity).collect();
    assert_eq!(quantities, vec![1, 2]);

    state
        .orm
        .execute_unprepared("DROP TRIGGER fail_cart_delete;")
        .await?;
    let placed = order_service::create_order(&state, &user).await?.data.unwrap();
    assert_eq!(placed.items.len(), 2);
    assert_eq!(Orders::find().count(&state.orm).await?, 1);
    Ok(())
}
