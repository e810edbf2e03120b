//! # Item Queries
//!
//! Every listing in folio starts from an [`ItemQuery`]. The two base views
//! mirror the two ways the site looks at its content:
//!
//! - [`ItemQuery::published`]: the public view. Only items with
//!   `is_published` set ever pass it, so public pages inherit the rule by
//!   construction instead of re-checking it.
//! - [`ItemQuery::all`]: every item, used by editors, the year archive and the
//!   refreshed listing returned after a mutation.
//!
//! On top of a base view a query narrows by at most a few predicates
//! (category, tag, year, client presence) and fixes the ordering. Newest first
//! is the only public ordering; the admin ordering breaks ties on title.

use crate::model::Item;
use chrono::Datelike;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Published,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrdering {
    /// `created_at` descending.
    Newest,
    /// `created_at` descending, then `title` ascending.
    NewestThenTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub visibility: Visibility,
    pub category: Option<Uuid>,
    pub tag: Option<Uuid>,
    pub year: Option<i32>,
    pub has_client: Option<bool>,
    pub ordering: ItemOrdering,
}

impl ItemQuery {
    pub fn published() -> Self {
        Self {
            visibility: Visibility::Published,
            category: None,
            tag: None,
            year: None,
            has_client: None,
            ordering: ItemOrdering::Newest,
        }
    }

    pub fn all() -> Self {
        Self {
            visibility: Visibility::All,
            ..Self::published()
        }
    }

    pub fn admin() -> Self {
        Self {
            ordering: ItemOrdering::NewestThenTitle,
            ..Self::all()
        }
    }

    pub fn in_category(mut self, category: Uuid) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tag(mut self, tag: Uuid) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn created_in(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn has_client(mut self, has_client: bool) -> Self {
        self.has_client = Some(has_client);
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        if self.visibility == Visibility::Published && !item.is_published {
            return false;
        }
        if let Some(category) = &self.category {
            if &item.category_id != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !item.has_tag(tag) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if item.created_at.year() != year {
                return false;
            }
        }
        if let Some(has_client) = self.has_client {
            if item.client_id.is_some() != has_client {
                return false;
            }
        }
        true
    }

    /// Filters and orders a full table scan.
    pub fn apply(&self, items: Vec<Item>) -> Vec<Item> {
        let mut selected: Vec<Item> = items.into_iter().filter(|i| self.matches(i)).collect();
        match self.ordering {
            ItemOrdering::Newest => {
                selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ItemOrdering::NewestThenTitle => {
                selected.sort_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| a.title.cmp(&b.title))
                });
            }
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(title: &str, published: bool, year: i32) -> Item {
        let mut item = Item::new(title, title.to_lowercase(), Uuid::nil());
        item.is_published = published;
        item.created_at = Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap();
        item
    }

    #[test]
    fn published_view_hides_drafts() {
        let items = vec![item("Live", true, 2022), item("Draft", false, 2022)];
        let listed = ItemQuery::published().apply(items);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Live");
    }

    #[test]
    fn all_view_keeps_drafts() {
        let items = vec![item("Live", true, 2022), item("Draft", false, 2022)];
        assert_eq!(ItemQuery::all().apply(items).len(), 2);
    }

    #[test]
    fn orders_newest_first() {
        let items = vec![item("Old", true, 2020), item("New", true, 2023)];
        let listed = ItemQuery::published().apply(items);
        assert_eq!(listed[0].title, "New");
        assert_eq!(listed[1].title, "Old");
    }

    #[test]
    fn admin_ordering_breaks_ties_on_title() {
        let items = vec![item("Beta", true, 2022), item("Alpha", false, 2022)];
        let listed = ItemQuery::admin().apply(items);
        assert_eq!(listed[0].title, "Alpha");
        assert_eq!(listed[1].title, "Beta");
    }

    #[test]
    fn narrows_by_year_category_and_tag() {
        let category = Uuid::new_v4();
        let tag = Uuid::new_v4();

        let mut tagged = item("Tagged", true, 2022);
        tagged.category_id = category;
        tagged.tag_ids = vec![tag];
        let other = item("Other", true, 2021);

        let items = vec![tagged, other];
        assert_eq!(ItemQuery::all().created_in(2021).apply(items.clone()).len(), 1);
        assert_eq!(
            ItemQuery::published().in_category(category).apply(items.clone())[0].title,
            "Tagged"
        );
        assert_eq!(ItemQuery::published().with_tag(tag).apply(items).len(), 1);
    }

    #[test]
    fn filters_on_client_presence() {
        let mut with_client = item("Client work", true, 2022);
        with_client.client_id = Some(Uuid::new_v4());
        let items = vec![with_client, item("Own work", true, 2022)];

        let listed = ItemQuery::admin().has_client(true).apply(items.clone());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Client work");

        let listed = ItemQuery::admin().has_client(false).apply(items);
        assert_eq!(listed[0].title, "Own work");
    }
}
