use axum::Router;

use crate::state::AppState;

pub mod carts;
pub mod doc;
pub mod health;
pub mod items;
pub mod orders;
pub mod params;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/carts", carts::router())
        .nest("/orders", orders::router())
        .nest("/items", items::router())
}
