//! Operation vocabulary for the site's CRUD endpoints.

use super::transport::RequestBody;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A managed content collection on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Projects,
    Events,
    Careers,
    Videos,
    TeamMembers,
    TeamInterns,
}

impl Resource {
    /// Collection path, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Projects => "/projects",
            Self::Events => "/events",
            Self::Careers => "/careers",
            Self::Videos => "/videos",
            Self::TeamMembers => "/team/members",
            Self::TeamInterns => "/team/interns",
        }
    }

    /// Path of a single record within the collection.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id))
    }
}

/// A single request against the site API.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Fetch the full collection.
    List { resource: Resource },
    /// Create a new record (JSON or multipart body depending on the form).
    Create { resource: Resource, body: RequestBody },
    /// Replace an existing record.
    Update {
        resource: Resource,
        id: String,
        body: RequestBody,
    },
    /// Delete a record by id.
    Delete { resource: Resource, id: String },
    /// Flip a career opening between open and closed.
    ToggleOpening { id: String },
}

impl Operation {
    pub fn list(resource: Resource) -> Self {
        Self::List { resource }
    }

    pub fn create(resource: Resource, body: RequestBody) -> Self {
        Self::Create { resource, body }
    }

    pub fn update(resource: Resource, id: impl Into<String>, body: RequestBody) -> Self {
        Self::Update {
            resource,
            id: id.into(),
            body,
        }
    }

    pub fn delete(resource: Resource, id: impl Into<String>) -> Self {
        Self::Delete {
            resource,
            id: id.into(),
        }
    }

    pub fn toggle_opening(id: impl Into<String>) -> Self {
        Self::ToggleOpening { id: id.into() }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::List { .. } => HttpMethod::Get,
            Self::Create { .. } => HttpMethod::Post,
            Self::Update { .. } => HttpMethod::Put,
            Self::Delete { .. } => HttpMethod::Delete,
            Self::ToggleOpening { .. } => HttpMethod::Put,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::List { resource } => resource.path().to_string(),
            Self::Create { resource, .. } => resource.path().to_string(),
            Self::Update { resource, id, .. } => resource.item_path(id),
            Self::Delete { resource, id } => resource.item_path(id),
            Self::ToggleOpening { id } => {
                format!("/careers/{}/toggle", urlencoding::encode(id))
            }
        }
    }

    pub fn into_body(self) -> RequestBody {
        match self {
            Self::Create { body, .. } | Self::Update { body, .. } => body,
            Self::List { .. } | Self::Delete { .. } | Self::ToggleOpening { .. } => {
                RequestBody::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_path_targets_single_opening() {
        let op = Operation::toggle_opening("64ab12");
        assert_eq!(op.method(), HttpMethod::Put);
        assert_eq!(op.path(), "/careers/64ab12/toggle");
    }

    #[test]
    fn item_paths_escape_ids() {
        assert_eq!(
            Resource::Projects.item_path("a b"),
            "/projects/a%20b"
        );
    }

    #[test]
    fn list_paths_are_collection_roots() {
        assert_eq!(Operation::list(Resource::Videos).method(), HttpMethod::Get);
        assert_eq!(Operation::list(Resource::TeamInterns).path(), "/team/interns");
    }
}
