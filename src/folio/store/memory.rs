use super::{DataStore, Record};
use crate::error::{FolioError, Result};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    tables: HashMap<&'static str, HashMap<Uuid, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn load<R: Record>(&self) -> Result<Vec<R>> {
        let Some(table) = self.tables.get(R::TABLE) else {
            return Ok(Vec::new());
        };
        table
            .values()
            .map(|v| serde_json::from_value(v.clone()).map_err(FolioError::Serialization))
            .collect()
    }

    fn upsert<R: Record>(&mut self, record: &R) -> Result<()> {
        let value = serde_json::to_value(record).map_err(FolioError::Serialization)?;
        self.tables
            .entry(R::TABLE)
            .or_default()
            .insert(record.id(), value);
        Ok(())
    }

    fn remove<R: Record>(&mut self, id: &Uuid) -> Result<()> {
        let removed = self
            .tables
            .get_mut(R::TABLE)
            .and_then(|table| table.remove(id));
        if removed.is_none() {
            return Err(FolioError::NotFound(format!("{} {}", R::LABEL, id)));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Category, Client, Item, Tag};
    use chrono::{DateTime, TimeZone, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_category(mut self, name: &str, slug: &str) -> Self {
            self.store.save(&Category::new(name, slug)).unwrap();
            self
        }

        pub fn with_tag(mut self, name: &str, slug: &str) -> Self {
            self.store.save(&Tag::new(name, slug)).unwrap();
            self
        }

        pub fn with_client(mut self, name: &str, email: &str) -> Self {
            self.store.save(&Client::new(name, email)).unwrap();
            self
        }

        /// Adds a published item in the given category, created now.
        pub fn with_published(self, title: &str, slug: &str, category_slug: &str) -> Self {
            self.with_item(title, slug, category_slug, true, Utc::now(), &[])
        }

        /// Adds an unpublished item in the given category, created now.
        pub fn with_draft(self, title: &str, slug: &str, category_slug: &str) -> Self {
            self.with_item(title, slug, category_slug, false, Utc::now(), &[])
        }

        pub fn with_item(
            mut self,
            title: &str,
            slug: &str,
            category_slug: &str,
            is_published: bool,
            created_at: DateTime<Utc>,
            tag_slugs: &[&str],
        ) -> Self {
            let category: Category = self.store.get_by_slug(category_slug).unwrap();
            let mut item = Item::new(title, slug, category.id);
            item.description = format!("About {}", title);
            item.is_published = is_published;
            item.created_at = created_at;
            let tag_ids: Vec<Uuid> = tag_slugs
                .iter()
                .map(|s| self.store.get_by_slug::<Tag>(s).unwrap().id)
                .collect();
            item.set_tags(&tag_ids);
            self.store.save(&item).unwrap();
            self
        }

        pub fn item(&self, slug: &str) -> Item {
            self.store.get_by_slug(slug).unwrap()
        }

        pub fn category(&self, slug: &str) -> Category {
            self.store.get_by_slug(slug).unwrap()
        }

        pub fn tag(&self, slug: &str) -> Tag {
            self.store.get_by_slug(slug).unwrap()
        }
    }

    pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Item, Tag};

    #[test]
    fn save_and_get_roundtrip() {
        let mut store = InMemoryStore::new();
        let category = Category::new("Web", "web");
        store.save(&category).unwrap();

        let loaded: Category = store.get(&category.id).unwrap();
        assert_eq!(loaded, category);
    }

    #[test]
    fn save_rejects_duplicate_slug() {
        let mut store = InMemoryStore::new();
        let category = Category::new("Web", "web");
        store.save(&category).unwrap();

        store.save(&Item::new("One", "same", category.id)).unwrap();
        let err = store
            .save(&Item::new("Two", "same", category.id))
            .unwrap_err();
        assert!(matches!(err, FolioError::Conflict { field: "slug", .. }));
    }

    #[test]
    fn resaving_the_same_record_is_not_a_conflict() {
        let mut store = InMemoryStore::new();
        let mut tag = Tag::new("Rust", "rust");
        store.save(&tag).unwrap();
        tag.name = "Rust lang".into();
        store.save(&tag).unwrap();
        assert_eq!(store.load::<Tag>().unwrap().len(), 1);
    }

    #[test]
    fn remove_unknown_is_not_found() {
        let mut store = InMemoryStore::new();
        let err = store.remove::<Item>(&Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }
}
