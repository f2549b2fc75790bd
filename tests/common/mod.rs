#![allow(dead_code)]

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use storefront_api::{
    db::{create_orm_conn, run_migrations},
    dto::auth::{LoginRequest, RegisterRequest},
    entity::{Items, items::Column as ItemCol},
    middleware::auth::AuthUser,
    models::User,
    password::PasswordHashing,
    seed::seed_catalog,
    services::auth_service,
    state::AppState,
};

pub const PASSWORD: &str = "password123";

/// Fresh in-memory database, migrated and seeded with the default catalog.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    seed_catalog(&orm).await?;

    Ok(AppState {
        orm,
        // Cheap parameters keep the suite fast.
        passwords: PasswordHashing::new(1024, 1, 1)?,
    })
}

pub async fn register(state: &AppState, username: &str) -> anyhow::Result<User> {
    let resp = auth_service::register_user(
        state,
        RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: PASSWORD.to_string(),
        },
    )
    .await?;
    Ok(resp.data.expect("registered user"))
}

pub async fn login(state: &AppState, username: &str) -> anyhow::Result<String> {
    let resp = auth_service::login_user(
        state,
        LoginRequest {
            username: username.to_string(),
            password: PASSWORD.to_string(),
        },
    )
    .await?;
    Ok(resp.data.expect("login data").token)
}

/// Register `username` and return the identity the auth extractor would yield.
pub async fn auth_user(state: &AppState, username: &str) -> anyhow::Result<AuthUser> {
    let user = register(state, username).await?;
    Ok(AuthUser { user_id: user.id })
}

pub async fn item_id(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let item = Items::find()
        .filter(ItemCol::Name.eq(name))
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no catalog item named {name}"))?;
    Ok(item.id)
}
