mod common;

use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use storefront_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    entity::{Users, timestamp, users::ActiveModel as UserActive},
    error::AppError,
    services::{auth_service, session_service},
};

#[tokio::test]
async fn duplicate_username_or_email_conflicts() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    common::register(&state, "alice").await?;

    let same_username = auth_service::register_user(
        &state,
        RegisterRequest {
            username: "alice".into(),
            email: "other@example.com".into(),
            password: common::PASSWORD.into(),
        },
    )
    .await;
    assert!(matches!(same_username, Err(AppError::Conflict(_))));

    let same_email = auth_service::register_user(
        &state,
        RegisterRequest {
            username: "alice2".into(),
            email: "alice@example.com".into(),
            password: common::PASSWORD.into(),
        },
    )
    .await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    let users = auth_service::list_users(&state).await?.data.unwrap().items;
    assert_eq!(users.len(), 1);
    Ok(())
}

#[tokio::test]
async fn password_is_stored_hashed() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::register(&state, "bob").await?;

    let stored = Users::find_by_id(user.id).one(&state.orm).await?.unwrap();
    assert_ne!(stored.password_hash, common::PASSWORD);
    assert!(state.passwords.verify(common::PASSWORD, &stored.password_hash).await?);
    assert!(!state.passwords.verify("password124", &stored.password_hash).await?);
    assert!(stored.token.is_none());
    Ok(())
}

#[tokio::test]
async fn login_token_resolves_to_the_same_user() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::register(&state, "carol").await?;

    let resp = auth_service::login_user(
        &state,
        LoginRequest {
            username: "carol".into(),
            password: common::PASSWORD.into(),
        },
    )
    .await?;
    let data = resp.data.unwrap();
    assert_eq!(data.user.id, user.id);
    assert!(data.token.starts_with(&format!("{}_", user.id)));

    let resolved = session_service::resolve_token(&state.orm, &data.token).await?;
    assert_eq!(resolved, Some(user.id));
    Ok(())
}

#[tokio::test]
async fn second_login_invalidates_first_token() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::register(&state, "dave").await?;

    let first = common::login(&state, "dave").await?;
    let second = common::login(&state, "dave").await?;
    assert_ne!(first, second);

    assert_eq!(session_service::resolve_token(&state.orm, &first).await?, None);
    assert_eq!(
        session_service::resolve_token(&state.orm, &second).await?,
        Some(user.id)
    );
    Ok(())
}

#[tokio::test]
async fn forged_prefix_is_not_trusted() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::register(&state, "erin").await?;
    common::login(&state, "erin").await?;

    let forged = format!("{}_{}", user.id, "0".repeat(32));
    assert_eq!(session_service::resolve_token(&state.orm, &forged).await?, None);
    Ok(())
}

#[tokio::test]
async fn unknown_user_and_wrong_password_look_the_same() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    common::register(&state, "frank").await?;

    let wrong_password = auth_service::login_user(
        &state,
        LoginRequest {
            username: "frank".into(),
            password: "not-the-password".into(),
        },
    )
    .await
    .unwrap_err();
    let unknown_user = auth_service::login_user(
        &state,
        LoginRequest {
            username: "nobody".into(),
            password: common::PASSWORD.into(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_user, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    Ok(())
}

#[tokio::test]
async fn soft_deleted_user_is_locked_out() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let user = common::register(&state, "grace").await?;
    let token = common::login(&state, "grace").await?;

    let stored = Users::find_by_id(user.id).one(&state.orm).await?.unwrap();
    let mut active: UserActive = stored.into();
    active.deleted_at = Set(Some(timestamp()));
    active.update(&state.orm).await?;

    assert_eq!(session_service::resolve_token(&state.orm, &token).await?, None);
    assert!(matches!(
        common::login(&state, "grace").await.unwrap_err().downcast::<AppError>()?,
        AppError::InvalidCredentials
    ));
    assert!(auth_service::list_users(&state).await?.data.unwrap().items.is_empty());
    Ok(())
}

#[tokio::test]
async fn users_are_listed_in_registration_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    common::register(&state, "zed").await?;
    common::register(&state, "amy").await?;

    let names: Vec<String> = auth_service::list_users(&state)
        .await?
        .data
        .unwrap()
        .items
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["zed", "amy"]);
    Ok(())
}
