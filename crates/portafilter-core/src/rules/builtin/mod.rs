//! Built-in rule implementations

pub mod comparison;
pub mod date;
pub mod magnitude;
pub mod membership;
pub mod presence;
pub mod types;

pub use comparison::FieldComparison;
pub use date::{DateComparison, DateComparisonKind};
pub use magnitude::{Magnitude, MagnitudeKind};
pub use membership::{AffixKind, AffixRule, ContainsRule, InRule};
pub use presence::{Nullable, Present, Required};
pub use types::{DateRule, DictRule, Email, ListRule, TypeRule};

use super::{Rule, RuleRegistry};
use crate::value_type::ValueType;
use std::sync::Arc;

fn shared<R: Rule + 'static>(rule: R) -> Arc<dyn Rule> {
    Arc::new(rule)
}

/// Register every built-in rule under its snake-case name
pub(crate) fn register_builtins(registry: &mut RuleRegistry) {
    registry.insert("required", |_| Ok(shared(Required)));
    registry.insert("nullable", |_| Ok(shared(Nullable)));
    registry.insert("present", |_| Ok(shared(Present)));

    for value_type in [
        ValueType::String,
        ValueType::Integer,
        ValueType::Numeric,
        ValueType::Boolean,
    ] {
        registry.insert(value_type.as_str(), move |_| Ok(shared(TypeRule::new(value_type))));
    }
    registry.insert("list", |params| ListRule::new(params).map(shared));
    registry.insert("dict", |params| Ok(shared(DictRule::new(params))));
    registry.insert("email", |_| Ok(shared(Email)));
    registry.insert("date", |_| Ok(shared(DateRule)));

    for kind in [
        MagnitudeKind::Min,
        MagnitudeKind::Max,
        MagnitudeKind::Size,
        MagnitudeKind::Between,
    ] {
        registry.insert(kind.as_str(), move |params| Magnitude::new(kind, params).map(shared));
    }

    registry.insert("in", |params| InRule::new(params, false).map(shared));
    registry.insert("not_in", |params| InRule::new(params, true).map(shared));
    registry.insert("starts_with", |params| {
        AffixRule::new(params, AffixKind::Prefix).map(shared)
    });
    registry.insert("ends_with", |params| {
        AffixRule::new(params, AffixKind::Suffix).map(shared)
    });
    registry.insert("contains", |params| ContainsRule::new(params, false).map(shared));
    registry.insert("contains_one_of", |params| ContainsRule::new(params, true).map(shared));

    registry.insert("same", |params| FieldComparison::same(params).map(shared));
    registry.insert("different", |params| FieldComparison::different(params).map(shared));

    for kind in [
        DateComparisonKind::After,
        DateComparisonKind::AfterOrEqual,
        DateComparisonKind::Before,
        DateComparisonKind::BeforeOrEqual,
    ] {
        registry.insert(kind.as_str(), move |params| DateComparison::new(kind, params).map(shared));
    }
}
