use crate::commands::helpers::{detail_of, with_choices};
use crate::commands::CmdResult;
use crate::error::{FolioError, Result};
use crate::forms::item::ItemFields;
use crate::model::Item;
use crate::store::{DataStore, ItemQuery};

/// A single published item. Drafts are reported as missing.
pub fn run<S: DataStore>(store: &S, slug: &str) -> Result<CmdResult> {
    let item = store
        .find_by::<Item>("slug", slug)?
        .filter(|item| ItemQuery::published().matches(item))
        .ok_or_else(|| FolioError::not_found(format!("Portfolio item '{}'", slug)))?;

    let mut result = CmdResult::default();
    result.detail = Some(detail_of(store, item)?);
    Ok(result)
}

/// Any item, published or not, prepared for the edit form.
pub fn editable<S: DataStore>(store: &S, slug: &str) -> Result<CmdResult> {
    let item: Item = store.get_by_slug(slug)?;
    let mut result = CmdResult::default().with_submitted(ItemFields::from_item(&item));
    result.detail = Some(detail_of(store, item)?);
    with_choices(result, store)
}
