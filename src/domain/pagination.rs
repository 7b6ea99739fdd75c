//! Page-number pagination over any [`EntityQuery`].

use crate::domain::schema::{DumpSchema, ProductResponse, ValidationErrors};
use crate::storage::{EntityQuery, RepositoryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_COUNT: u64 = 5;

pub const NOT_A_POSITIVE_INTEGER: &str = "Must be a positive integer.";
pub const DUPLICATE_PARAMETER: &str = "Must be given at most once.";

/// Raw `?page=&count=` query parameters.
///
/// Kept as strings so a malformed value produces a field-keyed 400 instead of an
/// extractor rejection.
#[derive(Deserialize, Debug, Default, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default 1). Pages past the end are clamped to the last page.
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Items per page (default 5).
    #[param(value_type = Option<u64>, minimum = 1)]
    pub count: Option<String>,
}

impl PageParams {
    /// Collects `page` and `count` from raw query pairs. Other keys are ignored; a
    /// repeated key is reported under its own name.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PaginationError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        let mut fields = ValidationErrors::new();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "count" => &mut params.count,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            } else if fields.field(&key).is_none() {
                fields.add(key, DUPLICATE_PARAMETER);
            }
        }
        if fields.is_empty() {
            Ok(params)
        } else {
            Err(PaginationError { fields })
        }
    }
}

/// Rejected pagination parameters. Distinct from entity validation failures.
#[derive(Debug, Error)]
#[error("invalid pagination parameters: {fields}")]
pub struct PaginationError {
    pub fields: ValidationErrors,
}

/// A validated page request: both values are >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    count: u64,
}

impl PageRequest {
    pub fn new(page: u64, count: u64) -> Result<Self, PaginationError> {
        let mut fields = ValidationErrors::new();
        if page == 0 {
            fields.add("page", NOT_A_POSITIVE_INTEGER);
        }
        if count == 0 {
            fields.add("count", NOT_A_POSITIVE_INTEGER);
        }
        if !fields.is_empty() {
            return Err(PaginationError { fields });
        }
        Ok(Self { page, count })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.count)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            count: DEFAULT_COUNT,
        }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PaginationError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let mut fields = ValidationErrors::new();
        let page = parse_positive("page", params.page.as_deref(), DEFAULT_PAGE, &mut fields);
        let count = parse_positive("count", params.count.as_deref(), DEFAULT_COUNT, &mut fields);
        match (page, count) {
            (Some(page), Some(count)) => Ok(Self { page, count }),
            _ => Err(PaginationError { fields }),
        }
    }
}

fn parse_positive(
    field: &str,
    raw: Option<&str>,
    default: u64,
    fields: &mut ValidationErrors,
) -> Option<u64> {
    let Some(raw) = raw else {
        return Some(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            fields.add(field, NOT_A_POSITIVE_INTEGER);
            None
        }
    }
}

/// Page envelope returned by collection endpoints.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[aliases(ProductPage = Page<ProductResponse>)]
pub struct Page<I> {
    /// Page actually served (after clamping).
    pub page: u64,
    pub items_per_page: u64,
    pub total_pages: u64,
    pub items: Vec<I>,
}

/// `ceil(total / count)`; zero when the collection is empty.
pub fn total_pages(total: u64, count: u64) -> u64 {
    total.div_ceil(count)
}

/// Clamps `page` to the last page. An empty collection leaves `page` untouched.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    if total_pages > 0 && page > total_pages {
        total_pages
    } else {
        page
    }
}

/// Counts `query`, clamps the requested page, then fetches and serializes that slice.
pub async fn paginate<T, Q, S>(
    query: &Q,
    request: PageRequest,
    schema: &S,
) -> Result<Page<S::Output>, RepositoryError>
where
    T: Send + 'static,
    Q: EntityQuery<T> + ?Sized,
    S: DumpSchema<T>,
{
    let total = query.count().await?;
    let total_pages = total_pages(total, request.count);
    let page = clamp_page(request.page, total_pages);

    let items = if total_pages == 0 {
        Vec::new()
    } else {
        let served = PageRequest { page, ..request };
        let entities = query.slice(served.offset(), served.count).await?;
        schema.dump_many(&entities)
    };

    Ok(Page {
        page,
        items_per_page: request.count,
        total_pages,
        items,
    })
}
