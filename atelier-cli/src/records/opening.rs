//! Career openings: JSON-bodied records with an open/closed toggle.

use serde::{Deserialize, Serialize};

use super::{Identify, ListRecord};
use crate::form::{FormModel, FormSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    #[serde(rename = "_id")]
    pub id: String,
    pub position: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub immediate_joiner: bool,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub is_open: bool,
}

impl Opening {
    pub const SCHEMA: FormSchema = FormSchema {
        required_text: &["position"],
        required_nested: &[],
        required_entry_lists: &[],
        requires_main_image: false,
    };

    pub fn create_form() -> FormModel {
        FormModel::new()
            .with_text("position", "")
            .with_text("shortDescription", "")
            .with_text("location", "")
            .with_text("salaryRange", "")
            .with_bool("immediateJoiner", false)
            .with_text("employmentType", "Full Time")
    }

    pub fn edit_form(&self) -> FormModel {
        FormModel::new()
            .with_text("position", &self.position)
            .with_text("shortDescription", &self.short_description)
            .with_text("location", &self.location)
            .with_text("salaryRange", &self.salary_range)
            .with_bool("immediateJoiner", self.immediate_joiner)
            .with_text("employmentType", &self.employment_type)
    }
}

impl Identify for Opening {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListRecord for Opening {
    fn display_field(&self) -> &str {
        &self.position
    }

    fn category(&self) -> Option<&str> {
        Some(&self.employment_type)
    }
}
