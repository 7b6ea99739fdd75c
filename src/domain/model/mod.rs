//! Domain model definitions for catalog entities.

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

pub mod product;

pub use product::Product;

/// Insert statement handed to [`Entity::bind_insert`].
pub type InsertQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Trait that binds a plain record type to its storage table.
///
/// A repository is generic over `Entity`, so every repository instance is tied to
/// exactly one table. Each implementation provides:
/// - Table name and primary key information
/// - The explicit column list used for reads and writes
/// - SQL schema definition
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Returns the name of the database table for this entity.
    fn table_name() -> &'static str;

    /// Returns the name of the store-generated primary key column.
    fn primary_key_field() -> &'static str {
        "id"
    }

    /// Columns selected on read, primary key included.
    fn columns() -> &'static [&'static str];

    /// Columns written on insert. The generated primary key is never written.
    fn insert_columns() -> &'static [&'static str];

    /// Returns the SQL CREATE TABLE statement for this entity.
    /// This is executed during database initialization.
    fn create_table_sql() -> &'static str;

    /// Binds one value per entry of [`Entity::insert_columns`], in order.
    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q>;

    /// Returns the entity with the generated primary key populated.
    fn with_id(self, id: i64) -> Self;
}
