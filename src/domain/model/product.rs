use super::{Entity, InsertQuery};

/// A catalog product. `id` stays `None` until the repository has persisted it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub inventory: i64,
}

impl Product {
    pub fn new(name: impl Into<String>, inventory: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            inventory,
        }
    }
}

// No CHECK on inventory: validation is the only gate for negative values.
impl Entity for Product {
    fn table_name() -> &'static str {
        "product"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "inventory"]
    }

    fn insert_columns() -> &'static [&'static str] {
        &["name", "inventory"]
    }

    fn create_table_sql() -> &'static str {
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            inventory INTEGER NOT NULL
        )"
    }

    fn bind_insert<'q>(&'q self, query: InsertQuery<'q>) -> InsertQuery<'q> {
        query.bind(self.name.as_str()).bind(self.inventory)
    }

    fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
