pub mod digest;
pub mod images;
pub mod instagram;

use anyhow::Context;
use pasos_db::DbPool;

/// Connect using `--database-url` / `DATABASE_URL`.
pub(crate) async fn connect(database_url: Option<&str>) -> anyhow::Result<DbPool> {
    let url = database_url.context("DATABASE_URL must be set")?;
    let pool = pasos_db::create_pool(url)
        .await
        .context("Failed to connect to database")?;
    Ok(pool)
}
