//! Form model: fields, typed paths, repeatable lists.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {0} does not accept value '{1}'")]
    InvalidValue(String, String),
    #[error("field {0} is not a {1} field")]
    WrongKind(String, &'static str),
    #[error("index {1} is out of range for list {0}")]
    IndexOutOfRange(String, usize),
    #[error("invalid field path: {0}")]
    InvalidPath(String),
}

/// One entry of a repeatable list. The id exists only to give the entry a
/// stable identity for the lifetime of the form session; it is never sent
/// to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: u64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Bool(bool),
    /// Nested sub-object of string values, e.g. area { value, unit }.
    Nested(BTreeMap<String, String>),
    /// Repeatable list of free-text entries.
    Entries(Vec<ListEntry>),
    /// Multi-select set of fixed choices, e.g. event categories.
    Multi(Vec<String>),
}

/// Typed field address: either a top-level field or one child of a nested
/// sub-object. Constructed directly in code; `parse` exists only for the
/// CLI boundary where paths arrive as user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldPath<'a> {
    Scalar(&'a str),
    Nested(&'a str, &'a str),
}

impl<'a> FieldPath<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, FormError> {
        match raw.split_once('.') {
            None if !raw.is_empty() => Ok(Self::Scalar(raw)),
            Some((parent, child))
                if !parent.is_empty() && !child.is_empty() && !child.contains('.') =>
            {
                Ok(Self::Nested(parent, child))
            }
            _ => Err(FormError::InvalidPath(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModel {
    fields: BTreeMap<String, FieldValue>,
    next_entry_id: u64,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: &str, initial: &str) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Text(initial.to_string()));
        self
    }

    pub fn with_number(mut self, name: &str, initial: i64) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Number(initial));
        self
    }

    pub fn with_bool(mut self, name: &str, initial: bool) -> Self {
        self.fields
            .insert(name.to_string(), FieldValue::Bool(initial));
        self
    }

    pub fn with_nested(mut self, name: &str, children: &[(&str, &str)]) -> Self {
        let map = children
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.fields.insert(name.to_string(), FieldValue::Nested(map));
        self
    }

    pub fn with_entries(mut self, name: &str, values: &[&str]) -> Self {
        let entries = values
            .iter()
            .map(|value| {
                let id = self.next_entry_id;
                self.next_entry_id += 1;
                ListEntry {
                    id,
                    value: value.to_string(),
                }
            })
            .collect();
        self.fields
            .insert(name.to_string(), FieldValue::Entries(entries));
        self
    }

    pub fn with_multi(mut self, name: &str, selected: &[&str]) -> Self {
        self.fields.insert(
            name.to_string(),
            FieldValue::Multi(selected.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Set the value at a field path. For a nested path only the
    /// addressed child changes; siblings and every other field are left
    /// untouched.
    pub fn set(&mut self, path: FieldPath<'_>, value: &str) -> Result<(), FormError> {
        match path {
            FieldPath::Scalar(name) => {
                let field = self
                    .fields
                    .get_mut(name)
                    .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
                match field {
                    FieldValue::Text(text) => {
                        *text = value.to_string();
                        Ok(())
                    }
                    FieldValue::Number(number) => {
                        *number = value.trim().parse().map_err(|_| {
                            FormError::InvalidValue(name.to_string(), value.to_string())
                        })?;
                        Ok(())
                    }
                    FieldValue::Bool(flag) => {
                        *flag = parse_bool(value).ok_or_else(|| {
                            FormError::InvalidValue(name.to_string(), value.to_string())
                        })?;
                        Ok(())
                    }
                    FieldValue::Nested(_) | FieldValue::Entries(_) | FieldValue::Multi(_) => {
                        Err(FormError::WrongKind(name.to_string(), "scalar"))
                    }
                }
            }
            FieldPath::Nested(parent, child) => {
                let field = self
                    .fields
                    .get_mut(parent)
                    .ok_or_else(|| FormError::UnknownField(parent.to_string()))?;
                match field {
                    FieldValue::Nested(map) => {
                        map.insert(child.to_string(), value.to_string());
                        Ok(())
                    }
                    _ => Err(FormError::WrongKind(parent.to_string(), "nested")),
                }
            }
        }
    }

    /// Append an empty entry with a fresh unique id; returns the id.
    pub fn add_list_item(&mut self, field: &str) -> Result<u64, FormError> {
        let id = self.next_entry_id;
        let entries = self.entries_mut(field)?;
        entries.push(ListEntry {
            id,
            value: String::new(),
        });
        self.next_entry_id += 1;
        Ok(id)
    }

    pub fn set_list_item(&mut self, field: &str, index: usize, value: &str) -> Result<(), FormError> {
        let entries = self.entries_mut(field)?;
        let entry = entries
            .get_mut(index)
            .ok_or_else(|| FormError::IndexOutOfRange(field.to_string(), index))?;
        entry.value = value.to_string();
        Ok(())
    }

    /// Splice an entry out by index.
    pub fn remove_list_item(&mut self, field: &str, index: usize) -> Result<(), FormError> {
        let entries = self.entries_mut(field)?;
        if index >= entries.len() {
            return Err(FormError::IndexOutOfRange(field.to_string(), index));
        }
        entries.remove(index);
        Ok(())
    }

    /// Add the value to a multi-select field, or remove it when already
    /// selected.
    pub fn toggle_list_member(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let selected = match self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?
        {
            FieldValue::Multi(selected) => selected,
            _ => return Err(FormError::WrongKind(field.to_string(), "multi-select")),
        };
        if let Some(position) = selected.iter().position(|v| v == value) {
            selected.remove(position);
        } else {
            selected.push(value.to_string());
        }
        Ok(())
    }

    pub fn entries(&self, field: &str) -> Option<&[ListEntry]> {
        match self.fields.get(field) {
            Some(FieldValue::Entries(entries)) => Some(entries),
            _ => None,
        }
    }

    fn entries_mut(&mut self, field: &str) -> Result<&mut Vec<ListEntry>, FormError> {
        match self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?
        {
            FieldValue::Entries(entries) => Ok(entries),
            _ => Err(FormError::WrongKind(field.to_string(), "list")),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
