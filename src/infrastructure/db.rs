use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One row per store. Values are nullable because SQLite stores NaN as NULL.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reward_settings (
            shop_domain TEXT PRIMARY KEY NOT NULL,
            affiliate_reward_type TEXT NOT NULL DEFAULT 'percentage',
            affiliate_reward_value REAL,
            customer_reward_type TEXT NOT NULL DEFAULT 'percentage',
            customer_reward_value REAL,
            next_order_discount_type TEXT NOT NULL DEFAULT 'percentage',
            next_order_discount_value REAL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    tracing::debug!("reward_settings schema ready");

    Ok(())
}
