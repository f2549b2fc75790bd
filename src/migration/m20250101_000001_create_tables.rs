use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use crate::entity::{CartItems, Carts, Items, OrderItems, Orders, Users, cart_items};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Table DDL is derived from the entities so the same migration runs on
        // both SQLite and Postgres.
        let schema = Schema::new(manager.get_database_backend());

        manager
            .create_table(schema.create_table_from_entity(Users))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Items))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Carts))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(CartItems))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Orders))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(OrderItems))
            .await?;

        // A cart holds at most one line per item; repeated adds bump the quantity.
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_cart_id_item_id")
                    .table(CartItems)
                    .col(cart_items::Column::CartId)
                    .col(cart_items::Column::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartItems).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;
        Ok(())
    }
}
