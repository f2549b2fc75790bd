use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::items::ItemList,
    error::AppResult,
    extract::QueryParams,
    response::ApiResponse,
    routes::params::Pagination,
    services::item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_items))
}

#[utoipa::path(
    get,
    path = "/items",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, default 10, max 100")
    ),
    responses(
        (status = 200, description = "One page of the catalog", body = ApiResponse<ItemList>),
        (status = 400, description = "Malformed query string")
    ),
    tag = "Items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = item_service::list_items(&state, pagination).await?;
    Ok(Json(resp))
}
