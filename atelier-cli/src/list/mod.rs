//! List views over server collections.

pub mod collection;

pub use collection::{CategoryFilter, Collection};
