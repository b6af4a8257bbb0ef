use crate::{config::Config, Connection, Result};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use std::ops::Deref;
use tracing::info;

pub type DbPool = Pool<ConnectionManager<Connection>>;

// Connection wrapper type: a r2d2 pooled connection usable
// wherever a &Connection is expected.
pub struct DbConn(pub PooledConnection<ConnectionManager<Connection>>);

impl Deref for DbConn {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub fn init_pool(config: &Config) -> Result<DbPool> {
    let manager = ConnectionManager::<Connection>::new(config.database_url.as_str());
    let mut builder = Pool::builder();
    if let Some(max_size) = config.db_max_size {
        builder = builder.max_size(max_size);
    }
    if let Some(min_idle) = config.db_min_idle {
        builder = builder.min_idle(Some(min_idle));
    }
    let pool = builder.build(manager)?;
    info!("database pool initialized");
    Ok(pool)
}
