use contracts::domain::a001_farmer_detail::aggregate::FarmerDetail;
use contracts::domain::common::AggregateRoot;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use std::path::Path;

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Opens (creating if needed) the SQLite file and bootstraps the schema.
///
/// The returned connection is owned by the caller; nothing is stored globally.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database at {}", absolute_path.display());

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Private in-memory database with the production schema.
///
/// A single pooled connection is kept so that every query sees the same
/// memory database.
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Idempotent schema bootstrap for the farmer detail table.
///
/// Uniqueness of `(coop_id, farmer_id)` and of `farmer_kyc_id` is enforced
/// here as well as by admission validation, so concurrent admissions cannot
/// both commit. An absent KYC id is stored as NULL, which the unique index
/// ignores.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let table = <FarmerDetail as AggregateRoot>::full_name();

    let statements = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                temp_id TEXT NOT NULL,
                coop_id TEXT NOT NULL,
                customer_id TEXT NOT NULL DEFAULT '',
                vendor_id TEXT NOT NULL DEFAULT '',
                customer_id_updated_at TEXT,
                vendor_id_updated_at TEXT,
                farmer_id TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                mobile_number TEXT NOT NULL DEFAULT '',
                region_id INTEGER NOT NULL DEFAULT 0,
                region_part_id INTEGER NOT NULL DEFAULT 0,
                settlement_id INTEGER NOT NULL DEFAULT 0,
                settlement_part_id INTEGER NOT NULL DEFAULT 0,
                custom_geography_structure1_id TEXT NOT NULL DEFAULT '',
                custom_geography_structure2_id TEXT NOT NULL DEFAULT '',
                zip_code TEXT NOT NULL DEFAULT '',
                farmer_kyc_type_id INTEGER NOT NULL DEFAULT 0,
                farmer_kyc_type TEXT NOT NULL DEFAULT '',
                farmer_kyc_id TEXT,
                club_id TEXT NOT NULL DEFAULT '',
                club_name TEXT NOT NULL DEFAULT '',
                club_leader_farmer_id TEXT NOT NULL DEFAULT '',
                raithu_created_date TEXT,
                raithu_updated_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#
        ),
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_coop_farmer ON {table} (coop_id, farmer_id);"
        ),
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_kyc ON {table} (farmer_kyc_id);"
        ),
        format!("CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_temp ON {table} (temp_id);"),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_coop_updated ON {table} (coop_id, updated_at);"
        ),
    ];

    for sql in statements {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
            .await?;
    }

    tracing::info!("Schema for {} is ready", table);
    Ok(())
}
