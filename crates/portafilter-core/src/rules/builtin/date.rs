//! Date comparison rules: `after`, `before`, `after_or_equal` and
//! `before_or_equal`
//!
//! The parameter is a literal date, a day keyword or the path of another
//! field holding a date. Messages always show the parameter as written.

use crate::dates;
use crate::error::{Error, Result};
use crate::rules::{Rule, RuleContext};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComparisonKind {
    After,
    AfterOrEqual,
    Before,
    BeforeOrEqual,
}

impl DateComparisonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::After => "after",
            Self::AfterOrEqual => "after_or_equal",
            Self::Before => "before",
            Self::BeforeOrEqual => "before_or_equal",
        }
    }

    /// Whether a ruleset rule name belongs to this family
    pub fn is_date_comparison(name: &str) -> bool {
        matches!(name, "after" | "after_or_equal" | "before" | "before_or_equal")
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Self::After => ordering == Ordering::Greater,
            Self::AfterOrEqual => ordering != Ordering::Less,
            Self::Before => ordering == Ordering::Less,
            Self::BeforeOrEqual => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateComparison {
    kind: DateComparisonKind,
    params: Vec<String>,
}

impl DateComparison {
    pub fn new(kind: DateComparisonKind, params: Vec<String>) -> Result<Self> {
        if params.len() != 1 || params[0].trim().is_empty() {
            return Err(Error::invalid_param(
                kind.as_str(),
                "expected a date, a day keyword or an attribute path",
            ));
        }
        Ok(Self { kind, params })
    }

    fn param(&self) -> &str {
        &self.params[0]
    }

    /// The instant to compare against, from the literal or the other field.
    /// The other field stands in for the parameter, so it may hold a keyword.
    fn bound(&self, ctx: &RuleContext<'_>) -> Option<NaiveDateTime> {
        dates::parse_param(self.param()).or_else(|| {
            ctx.dependency
                .filter(|other| other.exists)
                .and_then(|other| other.value.as_str())
                .and_then(dates::parse_param)
        })
    }
}

impl Rule for DateComparison {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        match (dates::parse_value(ctx.value), self.bound(ctx)) {
            (Some(value), Some(bound)) => self.kind.accepts(value.cmp(&bound)),
            _ => false,
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.kind.as_str(), &[("date", self.param().to_string())])
    }

    fn dependency(&self) -> Option<&str> {
        match dates::parse_param(self.param()) {
            Some(_) => None,
            None => Some(self.param()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Resolved;
    use crate::rules::test_helpers::ctx;
    use crate::rules::RuleMetadata;
    use serde_json::json;

    fn rule(kind: DateComparisonKind, param: &str) -> DateComparison {
        DateComparison::new(kind, vec![param.to_string()]).unwrap()
    }

    #[test]
    fn test_literal_bounds() {
        let metadata = RuleMetadata { date: true, ..Default::default() };
        let day = json!("2022-12-22");

        assert!(!rule(DateComparisonKind::After, "2022-12-23").passes(&ctx(&day, &metadata)));
        assert!(rule(DateComparisonKind::Before, "2022-12-23").passes(&ctx(&day, &metadata)));
        assert!(rule(DateComparisonKind::AfterOrEqual, "2022-12-22").passes(&ctx(&day, &metadata)));
        assert!(!rule(DateComparisonKind::After, "2022-12-22").passes(&ctx(&day, &metadata)));
        assert!(rule(DateComparisonKind::BeforeOrEqual, "2022-12-22").passes(&ctx(&day, &metadata)));
        assert!(!rule(DateComparisonKind::BeforeOrEqual, "2022-12-21").passes(&ctx(&day, &metadata)));
    }

    #[test]
    fn test_keyword_bounds() {
        let metadata = RuleMetadata { date: true, ..Default::default() };
        let today = json!(chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());

        assert!(rule(DateComparisonKind::After, "yesterday").passes(&ctx(&today, &metadata)));
        assert!(rule(DateComparisonKind::Before, "Tomorrow").passes(&ctx(&today, &metadata)));
        assert!(!rule(DateComparisonKind::Before, "today").passes(&ctx(&today, &metadata)));
        assert!(rule(DateComparisonKind::AfterOrEqual, "today").passes(&ctx(&today, &metadata)));
        assert!(!rule(DateComparisonKind::After, "today").passes(&ctx(&json!("today"), &metadata)));
    }

    #[test]
    fn test_attribute_bound() {
        let metadata = RuleMetadata { date: true, ..Default::default() };
        let start = json!("2023-03-01");
        let end = json!("2023-02-01");
        let before = rule(DateComparisonKind::Before, "end_date");

        assert_eq!(before.dependency(), Some("end_date"));
        assert_eq!(rule(DateComparisonKind::Before, "today").dependency(), None);

        let context = ctx(&start, &metadata).with_dependency(Some(Resolved::found(&end)));
        assert!(!before.passes(&context));
        let context = crate::rules::RuleContext { attribute: "start_date", ..context };
        assert_eq!(before.message(&context), "The start_date must be a date before end_date.");

        // Unresolvable parameters fail rather than erroring
        assert!(!before.passes(&ctx(&start, &metadata)));
    }
}
