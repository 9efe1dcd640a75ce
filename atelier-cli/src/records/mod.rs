//! Domain records as the site API serves them.
//!
//! Wire names are camelCase and identity is the server-assigned `_id`.
//! Each record type knows how to build its create form and how to hydrate
//! an edit form from an existing record.

mod event;
mod opening;
mod person;
mod project;
mod video;

pub use event::{Event, EVENT_CATEGORIES};
pub use opening::Opening;
pub use person::{Person, PersonKind};
pub use project::{Area, Project, Quote};
pub use video::{Video, VideoProvider, VideoSource};

/// A record with a stable server-assigned identity.
pub trait Identify {
    fn id(&self) -> &str;
}

/// A record shown in a list view: searched by its display field and
/// filtered by an optional category.
pub trait ListRecord: Identify {
    fn display_field(&self) -> &str;
    fn category(&self) -> Option<&str> {
        None
    }
}
