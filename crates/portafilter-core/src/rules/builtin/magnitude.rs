//! Magnitude rules: `min`, `max`, `size` and `between`
//!
//! What is measured depends on the field's inferred value type: characters
//! for strings, elements for lists and the number itself for integer and
//! numeric fields. `between` on a date-typed field compares instants.
//! Dict and boolean fields cannot be measured.

use crate::dates;
use crate::error::{Error, Result};
use crate::rules::{Rule, RuleContext, RuleMetadata};
use crate::value_type::ValueType;
use chrono::NaiveDateTime;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeKind {
    Min,
    Max,
    Size,
    Between,
}

impl MagnitudeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Size => "size",
            Self::Between => "between",
        }
    }

    fn arity(&self) -> usize {
        match self {
            Self::Between => 2,
            _ => 1,
        }
    }
}

/// One measured quantity, compared against bounds of the same kind
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Measure {
    Length(usize),
    Number(f64),
    Instant(NaiveDateTime),
}

#[derive(Debug, Clone)]
pub struct Magnitude {
    kind: MagnitudeKind,
    params: Vec<String>,
}

impl Magnitude {
    pub fn new(kind: MagnitudeKind, params: Vec<String>) -> Result<Self> {
        if params.len() != kind.arity() {
            return Err(Error::invalid_param(
                kind.as_str(),
                format!("expected {} parameter(s), got {}", kind.arity(), params.len()),
            ));
        }
        Ok(Self { kind, params })
    }

    pub fn kind(&self) -> MagnitudeKind {
        self.kind
    }

    fn uses_dates(&self, metadata: &RuleMetadata) -> bool {
        self.kind == MagnitudeKind::Between && metadata.date
    }

    fn parse_bound(&self, token: &str, metadata: &RuleMetadata) -> Result<Measure> {
        let rule = self.kind.as_str();

        if self.uses_dates(metadata) {
            return dates::parse_param(token)
                .map(Measure::Instant)
                .ok_or_else(|| Error::invalid_param(rule, format!("'{}' is not a date", token)));
        }

        match metadata.value_type {
            ValueType::String | ValueType::List => token
                .trim()
                .parse::<usize>()
                .map(Measure::Length)
                .map_err(|_| {
                    Error::invalid_param(rule, format!("'{}' is not a non-negative integer", token))
                }),
            ValueType::Integer | ValueType::Numeric => token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Measure::Number)
                .ok_or_else(|| Error::invalid_param(rule, format!("'{}' is not a number", token))),
            value_type => Err(Error::UnsupportedValueType {
                rule: rule.to_string(),
                value_type,
            }),
        }
    }

    fn measure(&self, value: &Value, metadata: &RuleMetadata) -> Option<Measure> {
        if self.uses_dates(metadata) {
            return dates::parse_value(value).map(Measure::Instant);
        }

        match (metadata.value_type, value) {
            (ValueType::String, Value::String(s)) => Some(Measure::Length(s.chars().count())),
            (ValueType::List, Value::Array(items)) => Some(Measure::Length(items.len())),
            (ValueType::Integer | ValueType::Numeric, Value::Number(n)) => {
                n.as_f64().map(Measure::Number)
            }
            _ => None,
        }
    }

    fn message_key(&self, metadata: &RuleMetadata) -> String {
        let suffix = if self.uses_dates(metadata) {
            "date"
        } else {
            match metadata.value_type {
                ValueType::List => "list",
                ValueType::Integer | ValueType::Numeric => "numeric",
                _ => "string",
            }
        };
        format!("{}.{}", self.kind.as_str(), suffix)
    }
}

impl Rule for Magnitude {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        let Some(measure) = self.measure(ctx.value, ctx.metadata) else {
            return false;
        };

        let bounds: Option<Vec<Measure>> = self
            .params
            .iter()
            .map(|token| self.parse_bound(token, ctx.metadata).ok())
            .collect();

        match (self.kind, bounds.as_deref()) {
            (MagnitudeKind::Min, Some([min])) => measure >= *min,
            (MagnitudeKind::Max, Some([max])) => measure <= *max,
            (MagnitudeKind::Size, Some([size])) => measure == *size,
            (MagnitudeKind::Between, Some([min, max])) => measure >= *min && measure <= *max,
            _ => false,
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        let key = self.message_key(ctx.metadata);
        match self.kind {
            MagnitudeKind::Between => ctx.trans(
                &key,
                &[
                    ("min", self.params[0].clone()),
                    ("max", self.params[1].clone()),
                ],
            ),
            kind => ctx.trans(&key, &[(kind.as_str(), self.params[0].clone())]),
        }
    }

    fn check(&self, metadata: &RuleMetadata) -> Result<()> {
        if !self.uses_dates(metadata) && !metadata.value_type.is_measurable() {
            return Err(Error::UnsupportedValueType {
                rule: self.kind.as_str().to_string(),
                value_type: metadata.value_type,
            });
        }

        for token in &self.params {
            self.parse_bound(token, metadata)?;
        }
        Ok(())
    }
}
