//! Paginated listing: one count and one bounded fetch under the same filter.

use tracing::debug;

use crate::domain::ListingSource;
use crate::shared::{DomainResult, Listing, Page};

/// Reads the page described by `page` from `source`.
///
/// The count is taken first so the returned page always carries the true
/// number of rows, even when `page` lies past the last one and no items come
/// back.
pub async fn list_page<S>(source: &S, filter: &S::Filter, mut page: Page) -> DomainResult<Listing<S::Item>>
where
    S: ListingSource + ?Sized,
{
    let rows = source.count(filter).await?;
    page.set_rows(rows);

    let items = if page.offset() < rows {
        source.fetch(filter, page.offset(), page.limit()).await?
    } else {
        Vec::new()
    };

    debug!(
        path = page.path(),
        current = page.current(),
        rows,
        returned = items.len(),
        "Listing page read"
    );

    Ok(Listing { items, page })
}

/// Pager link for `route` carrying `params` as an encoded query string.
pub fn pager_path(route: &str, params: &[(&str, &str)]) -> String {
    match serde_urlencoded::to_string(params) {
        Ok(query) if !query.is_empty() => format!("{}?{}", route, query),
        _ => route.to_string(),
    }
}

/// Trimmed keyword, or `None` when it is absent or blank.
pub fn required_keyword(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}
