//! Type rules: `string`, `integer`, `numeric`, `boolean`, `list`, `dict`,
//! `email` and `date`

use crate::dates;
use crate::error::{Error, Result};
use crate::rules::{join_params, Rule, RuleContext};
use crate::value_type::ValueType;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

/// Scalar type check for `string`, `integer`, `numeric` and `boolean`
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    value_type: ValueType,
}

impl TypeRule {
    pub fn new(value_type: ValueType) -> Self {
        Self { value_type }
    }
}

impl Rule for TypeRule {
    fn name(&self) -> &str {
        self.value_type.as_str()
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        self.value_type.matches(ctx.value)
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans(self.value_type.as_str(), &[])
    }
}

/// `list` or `list:<type>`: a sequence, optionally of one element type
#[derive(Debug, Clone)]
pub struct ListRule {
    params: Vec<String>,
    item_type: Option<ValueType>,
}

impl ListRule {
    pub fn new(params: Vec<String>) -> Result<Self> {
        let item_type = match params.first() {
            Some(token) => Some(
                token
                    .parse::<ValueType>()
                    .map_err(|message| Error::invalid_param("list", message))?,
            ),
            None => None,
        };
        Ok(Self { params, item_type })
    }

    pub fn item_type(&self) -> Option<ValueType> {
        self.item_type
    }

    fn items_match(&self, ctx: &RuleContext<'_>) -> bool {
        match (ctx.value.as_array(), self.item_type) {
            (Some(items), Some(item_type)) => items.iter().all(|item| item_type.matches(item)),
            _ => true,
        }
    }
}

impl Rule for ListRule {
    fn name(&self) -> &str {
        "list"
    }

    fn params(&self) -> &[String] {
        &self.params
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.value.is_array() && self.items_match(ctx)
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        match self.item_type {
            Some(item_type) if ctx.value.is_array() => {
                ctx.trans("list_item_type", &[("type", item_type.to_string())])
            }
            _ => ctx.trans("list", &[]),
        }
    }
}

/// `dict` or `dict:k1,k2`: a map whose keys, if declared, form a closed set
#[derive(Debug, Clone)]
pub struct DictRule {
    keys: Vec<String>,
}

impl DictRule {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    fn keys_allowed(&self, ctx: &RuleContext<'_>) -> bool {
        match ctx.value.as_object() {
            Some(map) if !self.keys.is_empty() => map.keys().all(|key| self.keys.contains(key)),
            _ => true,
        }
    }
}

impl Rule for DictRule {
    fn name(&self) -> &str {
        "dict"
    }

    fn params(&self) -> &[String] {
        &self.keys
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        ctx.value.is_object() && self.keys_allowed(ctx)
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        if ctx.value.is_object() {
            ctx.trans("dict_keys", &[("keys", join_params(&self.keys))])
        } else {
            ctx.trans("dict", &[])
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &str {
        "email"
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        match (ctx.value.as_str(), email_regex()) {
            (Some(address), Some(regex)) => regex.is_match(address),
            _ => false,
        }
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans("email", &[])
    }
}

/// A string holding a literal date; keywords are not dates
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRule;

impl Rule for DateRule {
    fn name(&self) -> &str {
        "date"
    }

    fn passes(&self, ctx: &RuleContext<'_>) -> bool {
        dates::parse_value(ctx.value).is_some()
    }

    fn message(&self, ctx: &RuleContext<'_>) -> String {
        ctx.trans("date", &[])
    }
}
