#[macro_use]
extern crate diesel;
#[cfg(test)]
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate serde_derive;

use once_cell::sync::Lazy;

use crate::config::Config;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Connection = diesel::SqliteConnection;

#[cfg(all(not(feature = "sqlite"), feature = "postgres"))]
pub type Connection = diesel::PgConnection;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// All the possible errors that can be encountered in this crate
#[derive(Debug)]
pub enum Error {
    Db(diesel::result::Error),
    InvalidValue,
    NotFound,
    Pool(diesel::r2d2::PoolError),
    Unauthorized,
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Error::NotFound,
            _ => Error::Db(err),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Pool(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Adds a function to a model, that returns the first
/// matching row for a given list of columns.
///
/// Usage: `find_by!(model_table, name_of_the_function, column1 as type1, column2 as type2);`
macro_rules! find_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find a $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Self> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to retrieve a row by its ID
///
/// Usage: `get!(model_table);`
macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &crate::Connection, id: i32) -> Result<Self> {
            $table::table
                .filter($table::id.eq(id))
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to retrieve the most recently inserted row
///
/// Usage: `last!(model_table);`
macro_rules! last {
    ($table:ident) => {
        pub fn last(conn: &crate::Connection) -> Result<Self> {
            $table::table
                .order_by($table::id.desc())
                .first(conn)
                .map_err(Error::from)
        }
    };
}

/// Adds a function to a model to insert a new row
///
/// Usage: `insert!(model_table, NewModelType);`
macro_rules! insert {
    ($table:ident, $from:ty) => {
        last!($table);
        pub fn insert(conn: &crate::Connection, new: $from) -> Result<Self> {
            diesel::insert_into($table::table)
                .values(new)
                .execute(conn)?;
            Self::last(conn)
        }
    };
}

pub mod comments;
pub mod config;
pub mod db_conn;
pub mod follows;
pub mod groups;
pub mod pagination;
pub mod posts;
pub mod schema;
pub mod timeline;
pub mod users;

#[cfg(test)]
pub(crate) mod tests {
    use crate::Connection as Conn;
    use diesel::{Connection, RunQueryDsl};

    embed_migrations!();

    pub(crate) fn db() -> Conn {
        let conn = Conn::establish(":memory:").expect("Couldn't open the test database");
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(&conn)
            .expect("Couldn't enable foreign keys");
        embedded_migrations::run(&conn).expect("Couldn't run migrations");
        conn
    }
}
