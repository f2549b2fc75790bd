use password_hash::rand_core::{OsRng, RngCore};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::Expr};

use crate::{
    entity::{Users, timestamp, users::Column as UserCol},
    error::{AppError, AppResult},
};

const TOKEN_ENTROPY_BYTES: usize = 16;

/// Build a fresh session token of the form `<user_id>_<32 hex chars>`.
///
/// The prefix only helps a human reading logs or a database dump; it is
/// never parsed. A token is valid solely because it equals the value stored
/// on the user row.
pub fn generate_token(user_id: i32) -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{}_{}", user_id, hex::encode(bytes))
}

/// Issue a token for `user_id`, replacing whatever token the user held.
pub async fn issue_token<C: ConnectionTrait>(conn: &C, user_id: i32) -> AppResult<String> {
    let token = generate_token(user_id);
    let result = Users::update_many()
        .col_expr(UserCol::Token, Expr::value(token.clone()))
        .col_expr(UserCol::UpdatedAt, Expr::value(timestamp()))
        .filter(UserCol::Id.eq(user_id))
        .filter(UserCol::DeletedAt.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("User"));
    }
    Ok(token)
}

/// Look up the live user whose stored token equals `token` exactly.
pub async fn resolve_token<C: ConnectionTrait>(conn: &C, token: &str) -> AppResult<Option<i32>> {
    let user = Users::find()
        .filter(UserCol::Token.eq(token))
        .filter(UserCol::DeletedAt.is_null())
        .one(conn)
        .await?;
    Ok(user.map(|u| u.id))
}
