use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::seed_catalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    println!("Migrations applied");
    let seeded = seed_catalog(&orm).await?;
    println!("Seeded {seeded} catalog items");
    Ok(())
}
