//! Issue event → page property set.

use crate::domain::models::{IssueEvent, PropertySet, PropertyValue, StatusOption};
use crate::domain::ports::ContentConverter;

/// Separator used when flattening logins and label names into one text value.
const LIST_SEPARATOR: &str = ", ";

/// Find the option whose name equals `state`, ignoring case.
///
/// An absent state never matches.
pub fn find_status_option<'a>(
    state: Option<&str>,
    options: &'a [StatusOption],
) -> Option<&'a StatusOption> {
    let state = state?.to_lowercase();
    options
        .iter()
        .find(|option| option.name.to_lowercase() == state)
}

/// Build the property set for `event`.
///
/// Pure and deterministic; the body goes through `converter` and nothing else
/// leaves this function. When the issue state matches no entry of
/// `status_options` the set carries no status at all.
pub fn map_properties(
    event: &IssueEvent,
    status_options: &[StatusOption],
    converter: &dyn ContentConverter,
) -> PropertySet {
    let issue = &event.issue;

    let organization = event
        .organization
        .as_ref()
        .map_or("", |org| org.login.as_str());
    let assignees = issue
        .assignees
        .iter()
        .map(|user| user.login.as_str())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);
    let milestone = issue
        .milestone
        .as_ref()
        .map_or("", |milestone| milestone.title.as_str());
    let labels = issue
        .labels
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|label| label.name.as_str())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);

    PropertySet {
        name: PropertyValue::title(&issue.title),
        organization: PropertyValue::text(organization),
        repository: PropertyValue::text(&event.repository.name),
        number: PropertyValue::number(issue.number),
        body: converter.to_property_value(issue.body.as_deref()),
        assignees: PropertyValue::text(&assignees),
        milestone: PropertyValue::text(milestone),
        labels: PropertyValue::text(&labels),
        author: PropertyValue::text(&issue.user.login),
        created: PropertyValue::date(&issue.created_at),
        updated: PropertyValue::date(&issue.updated_at),
        id: PropertyValue::number(issue.id),
        status: find_status_option(issue.state.as_deref(), status_options)
            .map(PropertyValue::select),
    }
}
