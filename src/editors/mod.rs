//! Structured editors for JSON `content` fields.
//!
//! Every editor owns the whole decoded value. A mutation re-encodes all of it
//! and hands the text to the change listener, so the listener always holds a
//! complete `content` string.

pub mod about;
mod dispatcher;
pub mod home;
mod raw;
pub mod site;

use crate::content::{codec, evaluate, ContentRegistry, FieldIssue, Rule, ValidationReport};
use crate::error::{ConsoleError, Result};
use crate::models::SectionType;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use tracing::{debug, error, warn};

pub use dispatcher::{EditorDispatcher, EditorFactory, EditorSession};
pub use raw::RawTextEditor;

/// Receives the full encoded content after every change.
pub type ChangeListener = Box<dyn FnMut(&str) + Send>;

/// A list-valued field of a shape.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    /// Pointer pattern of the array; `*` matches any index. `""` is the root.
    pub pattern: &'static str,
    /// Removal is refused once the list is this short.
    pub min: usize,
    /// Value appended by an "add" action.
    pub item: fn() -> Value,
}

/// A typed content layout with its list fields and validation rules.
pub trait ContentShape:
    Serialize + DeserializeOwned + Clone + Default + PartialEq + fmt::Debug + Send + 'static
{
    fn lists() -> &'static [ListSpec];

    fn rules() -> Vec<Rule>;
}

/// Object-safe face of an editor, as returned by the dispatcher.
pub trait SectionEditor: Send {
    fn section_type(&self) -> SectionType;

    /// The current value as JSON.
    fn value(&self) -> Value;

    /// The current value encoded for the `content` field.
    fn content(&self) -> String;

    /// Writes `value` at `pointer`. The edit is rejected, leaving the state
    /// untouched, when the result no longer fits the shape.
    fn set_field(&mut self, pointer: &str, value: Value) -> Result<()>;

    /// Appends a default item to the list at `list`, returning its index.
    fn append(&mut self, list: &str) -> Result<usize>;

    /// Removes an item. Returns `false` without changing anything when the
    /// list is already at its minimum length.
    fn remove(&mut self, list: &str, index: usize) -> Result<bool>;

    fn validate(&self) -> ValidationReport;

    /// The stored content was well-formed JSON of another layout, so the
    /// editor opened on the template instead.
    fn layout_mismatch(&self) -> bool;

    fn on_change(&mut self, listener: ChangeListener);

    /// Chooses indented or single-line output for [`content`](Self::content).
    fn set_pretty(&mut self, pretty: bool);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Editor over a concrete [`ContentShape`].
pub struct TypedEditor<S: ContentShape> {
    section_type: SectionType,
    value: S,
    listener: Option<ChangeListener>,
    pretty: bool,
    layout_mismatch: bool,
}

impl<S: ContentShape> fmt::Debug for TypedEditor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedEditor")
            .field("section_type", &self.section_type)
            .field("value", &self.value)
            .finish()
    }
}

impl<S: ContentShape> TypedEditor<S> {
    /// Decodes `raw`, falling back to the registry template when it is
    /// missing, malformed or of the wrong shape. The last case is remembered
    /// in [`SectionEditor::layout_mismatch`].
    pub fn open(section_type: SectionType, raw: Option<&str>, registry: &ContentRegistry) -> Self {
        let Some(json) = codec::decode(raw) else {
            return Self::with_value(section_type, None, registry);
        };
        match serde_json::from_value::<S>(json) {
            Ok(value) => Self::with_value(section_type, Some(value), registry),
            Err(e) => {
                warn!("Stored {} content does not fit its layout: {}", section_type, e);
                let mut editor = Self::with_value(section_type, None, registry);
                editor.layout_mismatch = true;
                editor
            }
        }
    }

    pub fn with_value(section_type: SectionType, value: Option<S>, registry: &ContentRegistry) -> Self {
        let value = value.unwrap_or_else(|| seed(section_type, registry));
        TypedEditor {
            section_type,
            value,
            listener: None,
            pretty: true,
            layout_mismatch: false,
        }
    }

    pub fn get(&self) -> &S {
        &self.value
    }

    /// Typed mutation; the listener sees the result.
    pub fn update<F: FnOnce(&mut S)>(&mut self, edit: F) {
        edit(&mut self.value);
        self.emit();
    }

    fn emit(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            let encoded = codec::encode_with(&self.value, self.pretty);
            listener(&encoded);
        }
    }

    fn list_spec(list: &str) -> Result<&'static ListSpec> {
        S::lists()
            .iter()
            .find(|spec| pattern_matches(spec.pattern, list))
            .ok_or_else(|| ConsoleError::InvalidField(format!("{} is not a list field", display_pointer(list))))
    }

    /// Runs `edit` against the JSON form and adopts the result only if it
    /// still deserializes into `S`.
    fn edit_json<T, F>(&mut self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Value) -> Result<T>,
    {
        let mut json = serde_json::to_value(&self.value)?;
        let out = edit(&mut json)?;
        let next: S = serde_json::from_value(json).map_err(|e| {
            ConsoleError::InvalidField(format!("Edit does not fit the {} layout: {}", self.section_type, e))
        })?;
        self.value = next;
        self.emit();
        Ok(out)
    }

    fn list_minimum_issues(&self, root: &Value) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for spec in S::lists().iter().filter(|spec| spec.min > 0) {
            for (pointer, len) in list_lengths(spec.pattern, root) {
                if len < spec.min {
                    issues.push(FieldIssue::new(
                        pointer,
                        format!("At least {} entr{} required", spec.min, if spec.min == 1 { "y is" } else { "ies are" }),
                    ));
                }
            }
        }
        issues
    }
}

fn seed<S: ContentShape>(section_type: SectionType, registry: &ContentRegistry) -> S {
    let Some(template) = registry.template(section_type) else {
        error!("No content template registered for {}; starting from an empty value", section_type);
        return serde_json::from_value(Value::Object(Default::default())).unwrap_or_default();
    };
    match serde_json::from_value(template) {
        Ok(value) => value,
        Err(e) => {
            error!("Content template for {} does not fit its editor: {}", section_type, e);
            S::default()
        }
    }
}

impl<S: ContentShape> SectionEditor for TypedEditor<S> {
    fn section_type(&self) -> SectionType {
        self.section_type
    }

    fn value(&self) -> Value {
        serde_json::to_value(&self.value).unwrap_or(Value::Null)
    }

    fn content(&self) -> String {
        codec::encode_with(&self.value, self.pretty)
    }

    fn set_field(&mut self, pointer: &str, value: Value) -> Result<()> {
        debug!("{}: set {}", self.section_type, display_pointer(pointer));
        self.edit_json(|json| write_pointer(json, pointer, value))
    }

    fn append(&mut self, list: &str) -> Result<usize> {
        let spec = Self::list_spec(list)?;
        self.edit_json(|json| {
            let items = list_at(json, list, true)?;
            items.push((spec.item)());
            Ok(items.len() - 1)
        })
    }

    fn remove(&mut self, list: &str, index: usize) -> Result<bool> {
        let spec = Self::list_spec(list)?;
        let mut json = serde_json::to_value(&self.value)?;
        let len = list_at(&mut json, list, false)?.len();
        if index >= len {
            return Err(ConsoleError::InvalidField(format!(
                "{} has no entry {}",
                display_pointer(list),
                index
            )));
        }
        if len <= spec.min {
            debug!("{}: keeping {} at its minimum of {}", self.section_type, display_pointer(list), spec.min);
            return Ok(false);
        }
        self.edit_json(|json| {
            list_at(json, list, false)?.remove(index);
            Ok(true)
        })
    }

    fn validate(&self) -> ValidationReport {
        let root = SectionEditor::value(self);
        let mut report = evaluate(&S::rules(), &root);
        for issue in self.list_minimum_issues(&root) {
            report.push(issue);
        }
        report
    }

    fn layout_mismatch(&self) -> bool {
        self.layout_mismatch
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() {
        "/"
    } else {
        pointer
    }
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn pattern_matches(pattern: &str, pointer: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let pointer: Vec<&str> = pointer.split('/').collect();
    pattern.len() == pointer.len()
        && pattern.iter().zip(&pointer).all(|(want, got)| {
            if *want == "*" {
                got.parse::<usize>().is_ok()
            } else {
                want == got
            }
        })
}

/// The array at `pointer`. A missing or null field becomes an empty array
/// when `create` is set, so optional lists can be appended to.
fn list_at<'a>(json: &'a mut Value, pointer: &str, create: bool) -> Result<&'a mut Vec<Value>> {
    if create && json.pointer(pointer).map_or(true, Value::is_null) {
        write_pointer(json, pointer, Value::Array(Vec::new()))?;
    }
    json.pointer_mut(pointer)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| ConsoleError::InvalidField(format!("{} is not a list", display_pointer(pointer))))
}

/// Sets the value at `pointer`, inserting the final key into an existing object.
fn write_pointer(json: &mut Value, pointer: &str, value: Value) -> Result<()> {
    if pointer.is_empty() {
        *json = value;
        return Ok(());
    }
    let (parent, last) = pointer
        .rsplit_once('/')
        .ok_or_else(|| ConsoleError::InvalidField(format!("{} is not a JSON pointer", pointer)))?;
    let key = unescape(last);
    match json.pointer_mut(parent) {
        Some(Value::Object(map)) => {
            map.insert(key, value);
            Ok(())
        }
        Some(Value::Array(items)) => match key.parse::<usize>() {
            Ok(index) if index < items.len() => {
                items[index] = value;
                Ok(())
            }
            _ => Err(ConsoleError::InvalidField(format!("{} is out of range", pointer))),
        },
        _ => Err(ConsoleError::InvalidField(format!("{} does not exist", pointer))),
    }
}

/// Concrete pointer and length of every array matching `pattern`.
fn list_lengths(pattern: &str, root: &Value) -> Vec<(String, usize)> {
    fn walk(node: &Value, segments: &[&str], prefix: String, out: &mut Vec<(String, usize)>) {
        let Some((head, rest)) = segments.split_first() else {
            if let Value::Array(items) = node {
                out.push((prefix, items.len()));
            }
            return;
        };
        if *head == "*" {
            if let Value::Array(items) = node {
                for (index, item) in items.iter().enumerate() {
                    walk(item, rest, format!("{}/{}", prefix, index), out);
                }
            }
        } else if let Some(child) = node.get(*head) {
            walk(child, rest, format!("{}/{}", prefix, head), out);
        } else if rest.is_empty() {
            out.push((format!("{}/{}", prefix, head), 0));
        }
    }

    let segments: Vec<&str> = pattern.split('/').skip(1).collect();
    let mut out = Vec::new();
    walk(root, &segments, String::new(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("", ""));
        assert!(pattern_matches("/buttons", "/buttons"));
        assert!(pattern_matches("/categories/*/items", "/categories/3/items"));
        assert!(!pattern_matches("/categories/*/items", "/categories/x/items"));
        assert!(!pattern_matches("/buttons", ""));
    }

    #[test]
    fn test_write_pointer_inserts_and_replaces() {
        let mut json = json!({ "items": [{ "a": 1 }] });
        write_pointer(&mut json, "/items/0/b", json!(2)).unwrap();
        write_pointer(&mut json, "/items/0/a", json!(3)).unwrap();
        assert_eq!(json, json!({ "items": [{ "a": 3, "b": 2 }] }));

        assert!(write_pointer(&mut json, "/items/4/a", json!(1)).is_err());
        assert!(write_pointer(&mut json, "/missing/a", json!(1)).is_err());
    }

    #[test]
    fn test_list_lengths_reports_missing_lists() {
        let root = json!({ "categories": [{ "items": [1, 2] }, { "items": [] }] });
        assert_eq!(
            list_lengths("/categories/*/items", &root),
            vec![("/categories/0/items".to_string(), 2), ("/categories/1/items".to_string(), 0)]
        );
        assert_eq!(list_lengths("/highlights", &json!({})), vec![("/highlights".to_string(), 0)]);
        assert_eq!(list_lengths("", &json!([1])), vec![(String::new(), 1)]);
    }
}
