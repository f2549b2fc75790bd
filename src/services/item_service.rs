use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::{
    dto::items::ItemList,
    entity::{Items, items::Column as ItemCol},
    error::AppResult,
    models::Item,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// One page of the catalog in insertion order, with the total item count.
pub async fn list_items(state: &AppState, pagination: Pagination) -> AppResult<ApiResponse<ItemList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Items::find().order_by_asc(ItemCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Item::from)
        .collect();

    let meta = Meta::page(page, limit, total);
    Ok(ApiResponse::with_meta("Items", ItemList { items }, meta))
}
