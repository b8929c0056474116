//! Resolution of cross-field rule dependencies
//!
//! `same`/`different` compare against another attribute and the date
//! comparisons may name one instead of a literal date. The referenced paths
//! are resolved once per ruleset against the whole document, before the
//! ruleset's own attribute is expanded.

use crate::path::resolver::NULL;
use crate::path::{resolve, Resolution, Resolved};
use crate::rules::Ruleset;
use serde_json::Value;
use tracing::trace;

/// Resolve every dependency path a ruleset declares.
///
/// A reference that expands a wildcard has no single value to compare with
/// and is treated as an absent field.
pub(crate) fn resolve_dependencies<'a>(
    ruleset: &'a Ruleset,
    data: &'a Value,
) -> Vec<(&'a str, Resolved<'a>)> {
    ruleset
        .dependencies()
        .map(|path| {
            let resolved = match resolve(path, data) {
                Resolution::Single(resolved) => resolved,
                Resolution::Expanded(_) => {
                    trace!(path, "wildcard dependency treated as absent");
                    Resolved::missing(&NULL)
                }
            };
            (path, resolved)
        })
        .collect()
}
