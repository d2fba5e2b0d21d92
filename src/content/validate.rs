//! Declarative field rules evaluated against decoded content.
//!
//! A rule names a field with a JSON pointer pattern in which `*` stands for
//! every index of an array. Rules run on each edit to feed inline feedback,
//! but only the submit path refuses to continue on a failing report.

use crate::error::{ConsoleError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Concrete JSON pointer of the offending field.
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldIssue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    pub fn has_issue_at(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ConsoleError::Validation(self.issues))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Present, and not blank when it is a string.
    Required,
    /// Present and a number within the inclusive bounds.
    Range { min: f64, max: f64 },
    /// A `YYYY-MM-DD` calendar date.
    Date,
    /// One of a fixed set of strings.
    OneOf(&'static [&'static str]),
}

/// Guard deciding whether a rule applies. Field names are resolved against
/// the object holding the checked field, or from the root when they start
/// with `/`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum When {
    Always,
    Truthy(&'static str),
    Equals(&'static str, &'static str),
    NotEquals(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub when: When,
    pub message: &'static str,
}

impl Rule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Rule {
            field,
            check: Check::Required,
            when: When::Always,
            message,
        }
    }

    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Rule {
            field,
            check,
            when: When::Always,
            message,
        }
    }

    pub const fn when(mut self, when: When) -> Self {
        self.when = when;
        self
    }
}

pub fn evaluate(rules: &[Rule], root: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    for rule in rules {
        for target in expand(rule.field, root) {
            if !condition_holds(rule.when, &target, root) {
                continue;
            }
            if !check_passes(rule.check, target.value) {
                report.push(FieldIssue::new(target.pointer.clone(), rule.message));
            }
        }
    }
    report
}

struct Target<'a> {
    pointer: String,
    parent: Option<&'a Value>,
    value: Option<&'a Value>,
}

/// Resolves a pattern to every concrete field it names. The last segment may
/// be absent from its parent object; a missing intermediate yields nothing.
fn expand<'a>(pattern: &str, root: &'a Value) -> Vec<Target<'a>> {
    let segments: Vec<&str> = pattern.split('/').skip(1).collect();
    let mut out = Vec::new();
    if segments.is_empty() {
        out.push(Target {
            pointer: String::new(),
            parent: None,
            value: Some(root),
        });
        return out;
    }
    walk(root, &segments, String::new(), &mut out);
    out
}

fn walk<'a>(node: &'a Value, segments: &[&str], prefix: String, out: &mut Vec<Target<'a>>) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    let children: Vec<(String, Option<&'a Value>)> = if *head == "*" {
        match node {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), Some(item)))
                .collect(),
            _ => Vec::new(),
        }
    } else {
        match node {
            Value::Object(map) => vec![(head.to_string(), map.get(*head))],
            Value::Array(items) => match head.parse::<usize>() {
                Ok(index) => vec![(head.to_string(), items.get(index))],
                Err(_) => Vec::new(),
            },
            _ => Vec::new(),
        }
    };

    for (token, child) in children {
        let pointer = format!("{}/{}", prefix, token);
        if rest.is_empty() {
            out.push(Target {
                pointer,
                parent: Some(node),
                value: child,
            });
        } else if let Some(child) = child {
            walk(child, rest, pointer, out);
        }
    }
}

fn lookup<'a>(field: &str, target: &Target<'a>, root: &'a Value) -> Option<&'a Value> {
    if field.starts_with('/') {
        root.pointer(field)
    } else {
        target.parent.and_then(|parent| parent.get(field))
    }
}

fn condition_holds(when: When, target: &Target<'_>, root: &Value) -> bool {
    match when {
        When::Always => true,
        When::Truthy(field) => lookup(field, target, root).is_some_and(is_truthy),
        When::Equals(field, expected) => {
            lookup(field, target, root).and_then(Value::as_str) == Some(expected)
        }
        When::NotEquals(field, expected) => {
            lookup(field, target, root).and_then(Value::as_str) != Some(expected)
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn check_passes(check: Check, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match check {
        Check::Required => match value {
            Value::Null => false,
            Value::String(text) => !text.trim().is_empty(),
            _ => true,
        },
        Check::Range { min, max } => value
            .as_f64()
            .is_some_and(|number| number >= min && number <= max),
        Check::Date => value
            .as_str()
            .is_some_and(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok()),
        Check::OneOf(allowed) => value.as_str().is_some_and(|text| allowed.contains(&text)),
    }
}
