use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserList},
    entity::{
        Users, timestamp,
        users::{ActiveModel as UserActive, Column as UserCol},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::User,
    response::{ApiResponse, Meta},
    services::session_service,
    state::AppState,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload;

    let password_hash = state.passwords.hash(&password).await?;
    let now = timestamp();

    // Uniqueness is left to the storage constraints so that two concurrent
    // registrations cannot both pass a pre-check.
    let inserted = UserActive {
        id: NotSet,
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        token: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&state.orm)
    .await;

    let user = match inserted {
        Ok(user) => user,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = user.id, "user registered");
    Ok(ApiResponse::ok("User created successfully", User::from(user)))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .filter(UserCol::DeletedAt.is_null())
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::debug!("login for unknown username");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !state.passwords.verify(&password, &user.password_hash).await? {
        tracing::debug!(user_id = user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = session_service::issue_token(&state.orm, user.id).await?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            token,
            user: User::from(user),
        },
    ))
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let items: Vec<User> = Users::find()
        .filter(UserCol::DeletedAt.is_null())
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::listing(items.len());
    Ok(ApiResponse::with_meta("Users", UserList { items }, meta))
}
