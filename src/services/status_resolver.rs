//! Fetches the allowed status values of the target database.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{PropertySchema, StatusOption, STATUS_PROPERTY};
use crate::domain::ports::PageStore;

/// Retrieve the options of the `Status` select property of `database_id`.
///
/// Always hits the store; options are never cached between runs. A missing
/// property or one of another type is a [`DomainError::Configuration`].
pub async fn resolve_status_options(
    store: &dyn PageStore,
    database_id: &str,
) -> DomainResult<Vec<StatusOption>> {
    let schema = store.retrieve_database(database_id).await?;

    match schema.properties.get(STATUS_PROPERTY) {
        Some(PropertySchema::Select { options }) => {
            tracing::debug!(
                database_id = database_id,
                options = options.len(),
                "resolved status options"
            );
            Ok(options.clone())
        }
        Some(other) => Err(DomainError::Configuration(format!(
            "`{STATUS_PROPERTY}` property must be a select property, found `{}`",
            other.kind()
        ))),
        None => Err(DomainError::Configuration(format!(
            "database {database_id} has no `{STATUS_PROPERTY}` property"
        ))),
    }
}
