use crate::commands::create::{rejected, save_with_image, store_image};
use crate::commands::helpers::{detail_of, refreshed_listing};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::item::{clean, ItemFormKind};
use crate::forms::{FieldErrors, FormData, Validated};
use crate::media::MediaRoot;
use crate::model::Item;
use crate::store::DataStore;

/// Applies an edit to the item at `slug`, published or not.
///
/// The submitted tag list replaces the stored one. Leaving the image empty
/// keeps the current image. `created_at` never changes.
pub fn run<S: DataStore>(
    store: &mut S,
    media: &MediaRoot,
    slug: &str,
    data: &FormData,
) -> Result<CmdResult> {
    let mut item: Item = store.get_by_slug(slug)?;

    let draft = match clean(store, ItemFormKind::Model, data)? {
        Validated::Valid(draft) => draft,
        Validated::Invalid(errors) => return rejected_edit(store, data, errors, item),
    };

    let original = item.clone();
    draft.apply_to(&mut item);
    let stored = store_image(media, &mut item, &draft)?;
    if let Some(errors) = save_with_image(store, media, &item, stored.as_deref())? {
        return rejected_edit(store, data, errors, original);
    }

    let mut result = CmdResult::default().with_listed_items(refreshed_listing(store)?);
    result.add_message(CmdMessage::success(format!(
        "Portfolio item updated: {}",
        item.title
    )));
    result.affected_items.push(item);
    Ok(result)
}

/// Rejection that still knows which item was being edited.
fn rejected_edit<S: DataStore>(
    store: &S,
    data: &FormData,
    errors: FieldErrors,
    item: Item,
) -> Result<CmdResult> {
    let mut result = rejected(store, data, errors)?;
    if let Some(submitted) = result.submitted.as_mut() {
        submitted.image = item.image.clone();
    }
    result.detail = Some(detail_of(store, item)?);
    Ok(result)
}
