pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database::Database;
pub use app::seed::seed_sample_products;
pub use domain::model::{Entity, Product};
pub use domain::pagination::{paginate, Page, PageParams, PageRequest, PaginationError};
pub use domain::schema::{DumpSchema, LoadSchema, ProductCreateSchema, ProductSchema, ValidationErrors};
pub use storage::{EntityQuery, Repository, RepositoryError, SqliteRepository};
