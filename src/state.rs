use sea_orm::DatabaseConnection;

use crate::password::PasswordHashing;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub passwords: PasswordHashing,
}
