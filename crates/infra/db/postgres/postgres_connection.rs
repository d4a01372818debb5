use std::{sync::Arc, time::Duration};

use anyhow::Result;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared pool. `build` opens the initial connections eagerly, so an
/// unreachable database fails here instead of on the first request.
pub fn establish_connection(database_url: &str, max_connections: u32) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_connections)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)?;
    Ok(pool)
}

/// Runs a blocking Diesel query on tokio's blocking pool with a pooled connection.
pub async fn with_connection<T, F>(db_pool: &Arc<PgPoolSquad>, query: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> Result<T> + Send + 'static,
{
    let db_pool = Arc::clone(db_pool);

    tokio::task::spawn_blocking(move || {
        let mut conn = db_pool.get()?;
        query(&mut conn)
    })
    .await?
}
