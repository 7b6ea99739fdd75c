pub mod repository;
pub mod sqlite;

pub use repository::{EntityQuery, Repository, RepositoryError};
pub use sqlite::{SqliteQuery, SqliteRepository};
