//! Team members and interns. Both share the person shape; members carry
//! an extra specialty field.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{Identify, ListRecord};
use crate::api::Resource;
use crate::form::{FormModel, FormSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PersonKind {
    Member,
    Intern,
}

impl PersonKind {
    pub fn resource(&self) -> Resource {
        match self {
            Self::Member => Resource::TeamMembers,
            Self::Intern => Resource::TeamInterns,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Member => "team member",
            Self::Intern => "intern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Person {
    pub const SCHEMA: FormSchema = FormSchema {
        required_text: &["name", "role"],
        required_nested: &[],
        required_entry_lists: &[],
        requires_main_image: false,
    };

    pub fn create_form(kind: PersonKind) -> FormModel {
        let form = FormModel::new()
            .with_text("name", "")
            .with_text("role", "")
            .with_text("bio", "");
        match kind {
            PersonKind::Member => form.with_text("specialty", ""),
            PersonKind::Intern => form,
        }
    }

    pub fn edit_form(&self, kind: PersonKind) -> FormModel {
        let form = FormModel::new()
            .with_text("name", &self.name)
            .with_text("role", &self.role)
            .with_text("bio", &self.bio);
        match kind {
            PersonKind::Member => {
                form.with_text("specialty", self.specialty.as_deref().unwrap_or(""))
            }
            PersonKind::Intern => form,
        }
    }
}

impl Identify for Person {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ListRecord for Person {
    fn display_field(&self) -> &str {
        &self.name
    }
}
