//! Flattening the form model into transmittable payloads.
//!
//! Multipart encoding rules: repeatable lists become JSON-encoded arrays
//! of their non-empty entry values, nested objects become JSON-encoded
//! strings, multi-select fields become repeated `name[]` parts, scalars
//! pass through as plain text. The JSON encoding (careers, videos) keeps
//! native types instead.

use serde_json::{json, Map, Value};

use super::model::{FieldValue, FormModel, ListEntry};

/// Entry values trimmed of emptiness, order preserved. Entry ids never
/// leave the client.
pub fn flatten_entries(entries: &[ListEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.value.trim().is_empty())
        .map(|entry| entry.value.clone())
        .collect()
}

impl FormModel {
    /// Flatten into multipart text fields.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        for (name, value) in self.fields() {
            match value {
                FieldValue::Text(text) => fields.push((name.clone(), text.clone())),
                FieldValue::Number(number) => fields.push((name.clone(), number.to_string())),
                FieldValue::Bool(flag) => fields.push((name.clone(), flag.to_string())),
                FieldValue::Nested(map) => {
                    fields.push((name.clone(), json!(map).to_string()));
                }
                FieldValue::Entries(entries) => {
                    fields.push((name.clone(), json!(flatten_entries(entries)).to_string()));
                }
                FieldValue::Multi(selected) => {
                    for choice in selected {
                        fields.push((format!("{name}[]"), choice.clone()));
                    }
                }
            }
        }
        fields
    }

    /// Flatten into a JSON object body.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in self.fields() {
            let json_value = match value {
                FieldValue::Text(text) => Value::String(text.clone()),
                FieldValue::Number(number) => json!(number),
                FieldValue::Bool(flag) => Value::Bool(*flag),
                FieldValue::Nested(map) => json!(map),
                FieldValue::Entries(entries) => json!(flatten_entries(entries)),
                FieldValue::Multi(selected) => json!(selected),
            };
            object.insert(name.clone(), json_value);
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entries_are_dropped_in_order() {
        let entries = vec![
            ListEntry { id: 1, value: "a".into() },
            ListEntry { id: 2, value: "".into() },
            ListEntry { id: 3, value: "b".into() },
        ];
        assert_eq!(flatten_entries(&entries), vec!["a", "b"]);
    }

    #[test]
    fn multipart_fields_encode_lists_and_nested_objects_as_json() {
        let form = FormModel::new()
            .with_text("title", "Clay Pavilion")
            .with_nested("area", &[("unit", "sq.ft."), ("value", "900")])
            .with_entries("keyFeatures", &["Skylight", ""]);
        let fields = form.to_fields();

        let lookup = |name: &str| {
            fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(lookup("title"), Some("Clay Pavilion"));
        assert_eq!(lookup("keyFeatures"), Some(r#"["Skylight"]"#));
        let area: Value = serde_json::from_str(lookup("area").unwrap()).unwrap();
        assert_eq!(area["value"], "900");
        assert_eq!(area["unit"], "sq.ft.");
    }

    #[test]
    fn multi_select_becomes_repeated_bracket_parts() {
        let form = FormModel::new().with_multi("categories", &["Workshop", "Earth Building"]);
        let fields = form.to_fields();
        assert_eq!(
            fields,
            vec![
                ("categories[]".to_string(), "Workshop".to_string()),
                ("categories[]".to_string(), "Earth Building".to_string()),
            ]
        );
    }

    #[test]
    fn json_body_keeps_native_types() {
        let form = FormModel::new()
            .with_text("position", "Site Architect")
            .with_bool("immediateJoiner", true)
            .with_number("year", 2026);
        let body = form.to_json();
        assert_eq!(body["position"], "Site Architect");
        assert_eq!(body["immediateJoiner"], true);
        assert_eq!(body["year"], 2026);
    }
}
