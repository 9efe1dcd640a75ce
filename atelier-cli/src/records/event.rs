//! Events: dated records with a fixed multi-select category set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identify, ListRecord};
use crate::form::{FormModel, FormSchema};

pub const EVENT_CATEGORIES: [&str; 4] = [
    "Sustainable Architecture",
    "Workshop",
    "Construction",
    "Earth Building",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
}

impl Event {
    pub const SCHEMA: FormSchema = FormSchema {
        required_text: &["title", "tagline", "description", "date"],
        required_nested: &[],
        required_entry_lists: &[],
        requires_main_image: false,
    };

    pub fn create_form() -> FormModel {
        FormModel::new()
            .with_text("title", "")
            .with_text("tagline", "")
            .with_text("description", "")
            .with_text("date", "")
            .with_multi("categories", &[])
    }

    pub fn edit_form(&self) -> FormModel {
        let categories: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        FormModel::new()
            .with_text("title", &self.title)
            .with_text("tagline", &self.tagline)
            .with_text("description", &self.description)
            .with_text("date", &self.date.format("%Y-%m-%d").to_string())
            .with_multi("categories", &categories)
    }
}

impl Identify for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListRecord for Event {
    fn display_field(&self) -> &str {
        &self.title
    }
}
