//! Keyed structural diff over JSON records.
//!
//! Two record lists are compared by identity key rather than by position:
//! each list is turned into a map from key value to record, and the maps
//! are compared recursively. Change paths follow the `root['key']['field']`
//! convention so they read the same as the records' own field names.

use crate::core::domain::error::ValidationError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ---------------------------------------------------------------------------
// ChangeKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    DictionaryItemAdded,
    DictionaryItemRemoved,
    ValuesChanged,
    TypeChanges,
    IterableItemAdded,
    IterableItemRemoved,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DictionaryItemAdded => "dictionary_item_added",
            Self::DictionaryItemRemoved => "dictionary_item_removed",
            Self::ValuesChanged => "values_changed",
            Self::TypeChanges => "type_changes",
            Self::IterableItemAdded => "iterable_item_added",
            Self::IterableItemRemoved => "iterable_item_removed",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Change
// ---------------------------------------------------------------------------

/// A single difference found under one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Key value of the record the change belongs to.
    pub record_id: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

// ---------------------------------------------------------------------------
// DiffResult
// ---------------------------------------------------------------------------

/// Changes grouped by category. An empty result means the inputs are equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DiffResult {
    changes: BTreeMap<ChangeKind, Vec<Change>>,
}

impl DiffResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Total number of individual changes across all categories.
    pub fn change_count(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    /// Changes of one category, in discovery order.
    pub fn changes(&self, kind: ChangeKind) -> &[Change] {
        self.changes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All categories present in the result.
    pub fn kinds(&self) -> impl Iterator<Item = ChangeKind> + '_ {
        self.changes.keys().copied()
    }

    /// Every change recorded under the given record key.
    pub fn for_record<'a>(&'a self, record_id: &'a str) -> impl Iterator<Item = (ChangeKind, &'a Change)> + 'a {
        self.changes.iter().flat_map(move |(kind, changes)| {
            changes
                .iter()
                .filter(move |c| c.record_id == record_id)
                .map(move |c| (*kind, c))
        })
    }

    /// Record keys touched by at least one change, sorted and deduplicated.
    pub fn record_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .changes
            .values()
            .flatten()
            .map(|c| c.record_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn push(&mut self, kind: ChangeKind, change: Change) {
        self.changes.entry(kind).or_default().push(change);
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no changes");
        }
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(
            f,
            "{} change(s) across record(s) {}\n{}",
            self.change_count(),
            self.record_ids().join(", "),
            json
        )
    }
}

// ---------------------------------------------------------------------------
// Diffing
// ---------------------------------------------------------------------------

/// Compares two record lists grouped by `key`.
///
/// Records must be JSON objects carrying a unique string value under `key`.
pub fn diff_grouped_by(
    expected: &[Value],
    actual: &[Value],
    key: &str,
) -> Result<DiffResult, ValidationError> {
    let expected_map = group_by(expected, key, "expected")?;
    let actual_map = group_by(actual, key, "actual")?;

    let mut result = DiffResult::empty();

    for (id, old) in &expected_map {
        let path = format!("root['{}']", id);
        match actual_map.get(id) {
            None => result.push(
                ChangeKind::DictionaryItemRemoved,
                Change {
                    record_id: id.to_string(),
                    path,
                    old_value: Some((*old).clone()),
                    new_value: None,
                },
            ),
            Some(new) => diff_values(id, &path, old, new, &mut result),
        }
    }

    for (id, new) in &actual_map {
        if !expected_map.contains_key(id) {
            result.push(
                ChangeKind::DictionaryItemAdded,
                Change {
                    record_id: id.to_string(),
                    path: format!("root['{}']", id),
                    old_value: None,
                    new_value: Some((*new).clone()),
                },
            );
        }
    }

    Ok(result)
}

fn group_by<'a>(
    records: &'a [Value],
    key: &str,
    side: &str,
) -> Result<BTreeMap<&'a str, &'a Value>, ValidationError> {
    let mut map = BTreeMap::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let id = record
            .as_object()
            .and_then(|obj| obj.get(key))
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::Field {
                field: key.to_string(),
                message: format!(
                    "{} record at index {} is not an object with a string '{}'",
                    side, index, key
                ),
            })?;

        if let Some(first) = seen.insert(id, index) {
            return Err(ValidationError::ConstraintViolation(format!(
                "{} records at index {} and {} share {} '{}'",
                side, first, index, key, id
            )));
        }
        map.insert(id, record);
    }

    Ok(map)
}

fn diff_values(record_id: &str, path: &str, old: &Value, new: &Value, out: &mut DiffResult) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => diff_objects(record_id, path, a, b, out),
        (Value::Array(a), Value::Array(b)) => diff_arrays(record_id, path, a, b, out),
        _ if old == new => {}
        _ if same_type(old, new) => out.push(
            ChangeKind::ValuesChanged,
            change(record_id, path, Some(old), Some(new)),
        ),
        _ => out.push(
            ChangeKind::TypeChanges,
            change(record_id, path, Some(old), Some(new)),
        ),
    }
}

fn diff_objects(
    record_id: &str,
    path: &str,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    out: &mut DiffResult,
) {
    for (field, old_value) in old {
        let field_path = format!("{}['{}']", path, field);
        match new.get(field) {
            Some(new_value) => diff_values(record_id, &field_path, old_value, new_value, out),
            None => out.push(
                ChangeKind::DictionaryItemRemoved,
                change(record_id, &field_path, Some(old_value), None),
            ),
        }
    }
    for (field, new_value) in new {
        if !old.contains_key(field) {
            out.push(
                ChangeKind::DictionaryItemAdded,
                change(
                    record_id,
                    &format!("{}['{}']", path, field),
                    None,
                    Some(new_value),
                ),
            );
        }
    }
}

fn diff_arrays(record_id: &str, path: &str, old: &[Value], new: &[Value], out: &mut DiffResult) {
    let shared = old.len().min(new.len());
    for i in 0..shared {
        diff_values(record_id, &format!("{}[{}]", path, i), &old[i], &new[i], out);
    }
    for (i, value) in old.iter().enumerate().skip(shared) {
        out.push(
            ChangeKind::IterableItemRemoved,
            change(record_id, &format!("{}[{}]", path, i), Some(value), None),
        );
    }
    for (i, value) in new.iter().enumerate().skip(shared) {
        out.push(
            ChangeKind::IterableItemAdded,
            change(record_id, &format!("{}[{}]", path, i), None, Some(value)),
        );
    }
}

fn same_type(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn change(record_id: &str, path: &str, old: Option<&Value>, new: Option<&Value>) -> Change {
    Change {
        record_id: record_id.to_string(),
        path: path.to_string(),
        old_value: old.cloned(),
        new_value: new.cloned(),
    }
}
