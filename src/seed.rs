use sea_orm::{ActiveValue::NotSet, ConnectionTrait, EntityTrait, PaginatorTrait, Set};

use crate::entity::{
    Items,
    items::ActiveModel as ItemActive,
    timestamp,
};

/// Catalog inserted on first start.
pub const CATALOG: [(&str, &str, f64); 5] = [
    ("Laptop", "High-performance laptop", 999.99),
    ("Mouse", "Wireless mouse", 29.99),
    ("Keyboard", "Mechanical keyboard", 79.99),
    ("Monitor", "4K monitor", 299.99),
    ("Headphones", "Noise-canceling headphones", 199.99),
];

/// Insert [`CATALOG`] when the items table is empty. Returns how many items
/// were inserted.
pub async fn seed_catalog<C: ConnectionTrait>(conn: &C) -> anyhow::Result<u64> {
    if Items::find().count(conn).await? > 0 {
        return Ok(0);
    }

    let now = timestamp();
    let items = CATALOG.iter().map(|&(name, description, price)| ItemActive {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        price: Set(price),
        created_at: Set(now),
        updated_at: Set(now),
    });
    Items::insert_many(items).exec_without_returning(conn).await?;

    tracing::info!(count = CATALOG.len(), "seeded catalog");
    Ok(CATALOG.len() as u64)
}
