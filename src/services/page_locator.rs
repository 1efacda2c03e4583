//! Finds the page joined to a GitHub issue through its `ID` property.

use crate::domain::errors::DomainResult;
use crate::domain::models::{NumberEqualsQuery, PageId};
use crate::domain::ports::PageStore;

/// Look up the page whose `ID` number property equals `issue_id`.
///
/// Asks the store for at most one result. `Ok(None)` means no page exists; the
/// caller decides what that implies. Should the store ever hold duplicates,
/// the first result it returns wins.
pub async fn locate_page(
    store: &dyn PageStore,
    database_id: &str,
    issue_id: u64,
) -> DomainResult<Option<PageId>> {
    tracing::info!(
        issue_id = issue_id,
        "Querying database for page with github id {issue_id}"
    );

    let results = store
        .query_database(database_id, &NumberEqualsQuery::issue_id(issue_id))
        .await?;

    let page_id = results.into_iter().next();
    if let Some(page_id) = &page_id {
        tracing::info!(page_id = %page_id, "Query successful: page {page_id}");
    }
    Ok(page_id)
}
