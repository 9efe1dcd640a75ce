//! Projects: the richest record, with nested area/quote sub-objects and
//! repeatable feature/material lists.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{Identify, ListRecord};
use crate::form::{FormModel, FormSchema};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub year: i64,
    #[serde(default)]
    pub area: Area,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub materials_used: Vec<String>,
    #[serde(default)]
    pub seo_tags: Vec<String>,
    #[serde(default)]
    pub quote: Quote,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
}

impl Project {
    pub const SCHEMA: FormSchema = FormSchema {
        required_text: &[
            "title",
            "subtitle",
            "location",
            "projectType",
            "category",
            "status",
            "year",
            "description",
            "client",
        ],
        required_nested: &[("area", &["value", "unit"])],
        required_entry_lists: &["keyFeatures", "materialsUsed"],
        requires_main_image: true,
    };

    /// Empty create form with the console's defaults.
    pub fn create_form() -> FormModel {
        FormModel::new()
            .with_text("title", "")
            .with_text("subtitle", "")
            .with_text("location", "")
            .with_text("projectType", "")
            .with_text("category", "Architecture")
            .with_text("status", "Completed")
            .with_number("year", chrono::Utc::now().year() as i64)
            .with_nested("area", &[("value", ""), ("unit", "sq.ft.")])
            .with_text("client", "")
            .with_text("description", "")
            .with_entries("keyFeatures", &[""])
            .with_entries("materialsUsed", &[""])
            .with_nested("quote", &[("text", ""), ("author", "")])
    }

    /// Hydrate an edit form. Bookkeeping fields (`_id`, image URLs) stay
    /// out of the form so they never re-enter the outgoing payload.
    pub fn edit_form(&self) -> FormModel {
        let features: Vec<&str> = self.key_features.iter().map(String::as_str).collect();
        let materials: Vec<&str> = self.materials_used.iter().map(String::as_str).collect();
        let tags: Vec<&str> = self.seo_tags.iter().map(String::as_str).collect();
        FormModel::new()
            .with_text("title", &self.title)
            .with_text("subtitle", &self.subtitle)
            .with_text("location", &self.location)
            .with_text("projectType", &self.project_type)
            .with_text("category", &self.category)
            .with_text("status", &self.status)
            .with_number("year", self.year)
            .with_nested("area", &[("value", &self.area.value), ("unit", &self.area.unit)])
            .with_text("client", &self.client)
            .with_text("description", &self.description)
            .with_entries("keyFeatures", &features)
            .with_entries("materialsUsed", &materials)
            .with_entries("seoTags", &tags)
            .with_nested(
                "quote",
                &[("text", &self.quote.text), ("author", &self.quote.author)],
            )
    }
}

impl Identify for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListRecord for Project {
    fn display_field(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}
