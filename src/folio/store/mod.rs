//! # Storage Layer
//!
//! This module defines the storage abstraction for folio. The [`DataStore`] trait
//! allows the application to work with different storage backends.
//!
//! ## Design
//!
//! A store only knows three primitives over typed tables of [`Record`]s:
//! `load`, `upsert` and `remove`. Everything a relational layer would add on
//! top is provided by the trait itself so every backend behaves the same:
//!
//! - unique columns are checked by [`DataStore::save`] and reported as
//!   [`FolioError::Conflict`], which the form layer turns into field errors
//! - lookups by id or by a unique column
//! - [`DataStore::query_items`], which runs an [`ItemQuery`] (see [`query`])
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One pretty-printed JSON file per table (`items.json`, `tags.json`, ...)
//!   - Each file maps record ids to records
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── items.json
//! ├── categories.json
//! ├── tags.json
//! ├── clients.json
//! ├── users.json
//! ├── config.json      # Site configuration (see config.rs)
//! └── media/           # Uploads and item images
//! ```

use crate::error::{FolioError, Result};
use crate::model::{Category, Client, Item, Tag, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod fs;
pub mod memory;
pub mod query;

pub use query::{ItemOrdering, ItemQuery, Visibility};

/// A row type with a primary key and a table of its own.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const TABLE: &'static str;
    /// Human readable name used in not-found errors.
    const LABEL: &'static str;

    fn id(&self) -> Uuid;

    /// Columns whose values must be unique across the table.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl Record for Item {
    const TABLE: &'static str = "items";
    const LABEL: &'static str = "Portfolio item";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("slug", self.slug.clone())]
    }
}

impl Record for Category {
    const TABLE: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("slug", self.slug.clone())]
    }
}

impl Record for Tag {
    const TABLE: &'static str = "tags";
    const LABEL: &'static str = "Tag";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("slug", self.slug.clone())]
    }
}

impl Record for Client {
    const TABLE: &'static str = "clients";
    const LABEL: &'static str = "Client";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("email", self.email.to_lowercase()),
        ]
    }
}

/// Abstract interface for record storage.
///
/// Implementations must handle persistence and retrieval of whole tables;
/// constraint checks and lookups are provided on top of the primitives.
pub trait DataStore {
    /// Load every record of a table, in no particular order.
    fn load<R: Record>(&self) -> Result<Vec<R>>;

    /// Insert or replace a record by id, without constraint checks.
    fn upsert<R: Record>(&mut self, record: &R) -> Result<()>;

    /// Delete a record permanently. Fails with `NotFound` for unknown ids.
    fn remove<R: Record>(&mut self, id: &Uuid) -> Result<()>;

    /// Save a record (create or update), enforcing its unique columns.
    fn save<R: Record>(&mut self, record: &R) -> Result<()> {
        let existing = self.load::<R>()?;
        for (field, value) in record.unique_keys() {
            let taken = existing
                .iter()
                .filter(|other| other.id() != record.id())
                .any(|other| {
                    other
                        .unique_keys()
                        .iter()
                        .any(|(f, v)| *f == field && *v == value)
                });
            if taken {
                return Err(FolioError::Conflict { field, value });
            }
        }
        self.upsert(record)
    }

    fn get<R: Record>(&self, id: &Uuid) -> Result<R> {
        self.load::<R>()?
            .into_iter()
            .find(|r| r.id() == *id)
            .ok_or_else(|| FolioError::NotFound(format!("{} {}", R::LABEL, id)))
    }

    /// Find a record by one of its unique columns.
    fn find_by<R: Record>(&self, field: &str, value: &str) -> Result<Option<R>> {
        Ok(self.load::<R>()?.into_iter().find(|r| {
            r.unique_keys()
                .iter()
                .any(|(f, v)| *f == field && v == value)
        }))
    }

    /// Like [`DataStore::find_by`] on `slug`, failing with `NotFound` when absent.
    fn get_by_slug<R: Record>(&self, slug: &str) -> Result<R> {
        self.find_by::<R>("slug", slug)?
            .ok_or_else(|| FolioError::NotFound(format!("{} '{}'", R::LABEL, slug)))
    }

    fn query_items(&self, query: &ItemQuery) -> Result<Vec<Item>> {
        Ok(query.apply(self.load::<Item>()?))
    }
}
