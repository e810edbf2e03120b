use crate::commands::helpers::{detail_of, refreshed_listing};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Item;
use crate::store::DataStore;

/// Removes the item for good and returns the refreshed listing.
pub fn run<S: DataStore>(store: &mut S, slug: &str) -> Result<CmdResult> {
    let item: Item = store.get_by_slug(slug)?;
    store.remove::<Item>(&item.id)?;

    let mut result = CmdResult::default().with_listed_items(refreshed_listing(store)?);
    result.add_message(CmdMessage::success(format!(
        "Portfolio item deleted: {}",
        item.title
    )));
    result.affected_items.push(item);
    Ok(result)
}

/// What the delete confirmation shows.
pub fn confirm<S: DataStore>(store: &S, slug: &str) -> Result<CmdResult> {
    let item: Item = store.get_by_slug(slug)?;
    let mut result = CmdResult::default();
    result.detail = Some(detail_of(store, item)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::detail;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_category("Web", "web")
            .with_published("Site X", "site-x", "web")
            .with_draft("Draft Y", "draft-y", "web")
    }

    #[test]
    fn deleted_item_is_gone_from_detail() {
        let mut f = fixture();
        let result = run(&mut f.store, "site-x").unwrap();
        assert_eq!(result.affected_items[0].slug, "site-x");
        assert!(detail::run(&f.store, "site-x").unwrap_err().is_not_found());
    }

    #[test]
    fn refreshed_listing_keeps_drafts() {
        let mut f = fixture();
        let result = run(&mut f.store, "site-x").unwrap();
        assert_eq!(result.listed_items.len(), 1);
        assert_eq!(result.listed_items[0].item.slug, "draft-y");
    }

    #[test]
    fn drafts_can_be_deleted() {
        let mut f = fixture();
        assert!(confirm(&f.store, "draft-y").is_ok());
        run(&mut f.store, "draft-y").unwrap();
        assert!(confirm(&f.store, "draft-y").unwrap_err().is_not_found());
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let mut f = fixture();
        assert!(run(&mut f.store, "nope").unwrap_err().is_not_found());
    }
}
