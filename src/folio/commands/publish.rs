use crate::commands::helpers::items_by_slugs;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Bulk publish or unpublish. Every slug is resolved before anything changes.
pub fn set_published<S: DataStore>(
    store: &mut S,
    slugs: &[String],
    is_published: bool,
) -> Result<CmdResult> {
    let items = items_by_slugs(store, slugs)?;
    let mut result = CmdResult::default();

    for mut item in items {
        item.is_published = is_published;
        store.upsert(&item)?;
        result.affected_items.push(item);
    }

    let count = result.affected_items.len();
    if is_published {
        result.add_message(CmdMessage::success(format!("Published {} item(s).", count)));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Unpublished {} item(s).",
            count
        )));
    }
    Ok(result)
}
