//! Schema-driven validation run before any network call.
//!
//! Failure surfaces one aggregate message rather than per-field errors,
//! matching the admin console's behavior.

use thiserror::Error;

use super::model::{FieldValue, FormModel};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Which fields an entity's form requires before it may be submitted.
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    pub required_text: &'static [&'static str],
    pub required_nested: &'static [(&'static str, &'static [&'static str])],
    pub required_entry_lists: &'static [&'static str],
    pub requires_main_image: bool,
}

impl FormSchema {
    pub const fn empty() -> Self {
        Self {
            required_text: &[],
            required_nested: &[],
            required_entry_lists: &[],
            requires_main_image: false,
        }
    }
}

pub fn validate(
    schema: &FormSchema,
    form: &FormModel,
    has_main_image: bool,
) -> Result<(), ValidationError> {
    let complete = scalars_filled(schema, form)
        && nested_filled(schema, form)
        && lists_filled(schema, form)
        && (!schema.requires_main_image || has_main_image);

    if complete {
        Ok(())
    } else {
        Err(ValidationError(
            "Please fill in all required fields before submitting.".to_string(),
        ))
    }
}

fn scalars_filled(schema: &FormSchema, form: &FormModel) -> bool {
    schema.required_text.iter().all(|name| match form.get(name) {
        Some(FieldValue::Text(text)) => !text.trim().is_empty(),
        // Numbers and booleans always carry a value.
        Some(FieldValue::Number(_)) | Some(FieldValue::Bool(_)) => true,
        _ => false,
    })
}

fn nested_filled(schema: &FormSchema, form: &FormModel) -> bool {
    schema
        .required_nested
        .iter()
        .all(|(name, children)| match form.get(name) {
            Some(FieldValue::Nested(map)) => children
                .iter()
                .all(|child| map.get(*child).is_some_and(|v| !v.trim().is_empty())),
            _ => false,
        })
}

fn lists_filled(schema: &FormSchema, form: &FormModel) -> bool {
    schema.required_entry_lists.iter().all(|name| {
        form.entries(name).is_some_and(|entries| {
            !entries.is_empty() && entries.iter().all(|e| !e.value.trim().is_empty())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::model::FieldPath;
    use crate::records::Project;

    fn filled_project_form() -> FormModel {
        let mut form = Project::create_form();
        for (name, value) in [
            ("title", "Hillside House"),
            ("subtitle", "A courtyard home"),
            ("location", "Auroville"),
            ("projectType", "Residential"),
            ("description", "Rammed earth residence."),
            ("client", "Private"),
        ] {
            form.set(FieldPath::Scalar(name), value).unwrap();
        }
        form.set(FieldPath::Nested("area", "value"), "2400").unwrap();
        form.set_list_item("keyFeatures", 0, "Passive cooling").unwrap();
        form.set_list_item("materialsUsed", 0, "Rammed earth").unwrap();
        form
    }

    #[test]
    fn complete_form_validates() {
        let form = filled_project_form();
        assert!(validate(&Project::SCHEMA, &form, true).is_ok());
    }

    #[test]
    fn whitespace_only_scalar_fails() {
        let mut form = filled_project_form();
        form.set(FieldPath::Scalar("title"), "   ").unwrap();
        assert!(validate(&Project::SCHEMA, &form, true).is_err());
    }

    #[test]
    fn missing_nested_child_fails() {
        let mut form = filled_project_form();
        form.set(FieldPath::Nested("area", "value"), "").unwrap();
        assert!(validate(&Project::SCHEMA, &form, true).is_err());
    }

    #[test]
    fn empty_list_entry_fails() {
        let mut form = filled_project_form();
        form.add_list_item("keyFeatures").unwrap();
        assert!(validate(&Project::SCHEMA, &form, true).is_err());
    }

    #[test]
    fn missing_primary_image_fails() {
        let form = filled_project_form();
        let err = validate(&Project::SCHEMA, &form, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields before submitting."
        );
    }
}
