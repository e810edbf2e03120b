use crate::commands::CmdResult;
use crate::error::{FolioError, Result};
use crate::forms::item::SLUG_TAKEN;
use crate::forms::FieldErrors;
use crate::model::{Category, Client, Item, ItemDetail, Tag};
use crate::store::{DataStore, ItemQuery};
use std::collections::HashMap;
use uuid::Uuid;

/// Joins items with their category, tags and client.
pub fn details<S: DataStore>(store: &S, items: Vec<Item>) -> Result<Vec<ItemDetail>> {
    let categories: HashMap<Uuid, Category> = store
        .load::<Category>()?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let tags: HashMap<Uuid, Tag> = store
        .load::<Tag>()?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();
    let clients: HashMap<Uuid, Client> = store
        .load::<Client>()?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    items
        .into_iter()
        .map(|item| {
            let category = categories.get(&item.category_id).cloned().ok_or_else(|| {
                FolioError::Store(format!(
                    "Item '{}' references missing category {}",
                    item.slug, item.category_id
                ))
            })?;
            let tags = item
                .tag_ids
                .iter()
                .filter_map(|id| tags.get(id).cloned())
                .collect();
            let client = item.client_id.and_then(|id| clients.get(&id).cloned());
            Ok(ItemDetail {
                item,
                category,
                tags,
                client,
            })
        })
        .collect()
}

pub fn detail_of<S: DataStore>(store: &S, item: Item) -> Result<ItemDetail> {
    details(store, vec![item])?
        .pop()
        .ok_or_else(|| FolioError::Store("Detail lookup returned nothing".to_string()))
}

/// Every item, published or not, newest first. This is what a mutation hands
/// back for redrawing the item list.
pub fn refreshed_listing<S: DataStore>(store: &S) -> Result<Vec<ItemDetail>> {
    let items = store.query_items(&ItemQuery::all())?;
    details(store, items)
}

/// Looks up every slug before returning, so a bad slug fails the whole batch.
pub fn items_by_slugs<S: DataStore>(store: &S, slugs: &[String]) -> Result<Vec<Item>> {
    slugs.iter().map(|slug| store.get_by_slug::<Item>(slug)).collect()
}

/// Fills the option lists an item form offers, each ordered by name.
pub fn with_choices<S: DataStore>(mut result: CmdResult, store: &S) -> Result<CmdResult> {
    result.categories = sorted_by_name(store.load::<Category>()?, |c| &c.name);
    result.tags = sorted_by_name(store.load::<Tag>()?, |t| &t.name);
    result.clients = sorted_by_name(store.load::<Client>()?, |c| &c.name);
    Ok(result)
}

pub fn sorted_by_name<T>(mut records: Vec<T>, name: impl Fn(&T) -> &String) -> Vec<T> {
    records.sort_by(|a, b| name(a).cmp(name(b)));
    records
}

/// Saves an item, turning a slug collision into a field error.
///
/// Returns `Ok(Some(errors))` when the slug is taken; other failures
/// propagate.
pub fn save_item<S: DataStore>(store: &mut S, item: &Item) -> Result<Option<FieldErrors>> {
    match store.save(item) {
        Ok(()) => Ok(None),
        Err(FolioError::Conflict { field: "slug", .. }) => {
            let mut errors = FieldErrors::new();
            errors.add("slug", SLUG_TAKEN);
            Ok(Some(errors))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn details_resolve_references() {
        let f = StoreFixture::new()
            .with_category("Web", "web")
            .with_tag("Rust", "rust")
            .with_item(
                "Site X",
                "site-x",
                "web",
                true,
                chrono::Utc::now(),
                &["rust"],
            );
        let listed = details(&f.store, vec![f.item("site-x")]).unwrap();
        assert_eq!(listed[0].category.slug, "web");
        assert_eq!(listed[0].tags[0].slug, "rust");
        assert!(listed[0].client.is_none());
    }

    #[test]
    fn items_by_slugs_fails_on_first_unknown() {
        let f = StoreFixture::new()
            .with_category("Web", "web")
            .with_draft("Site X", "site-x", "web");
        let err = items_by_slugs(&f.store, &["site-x".into(), "nope".into()]).unwrap_err();
        assert!(err.is_not_found());
    }
}
