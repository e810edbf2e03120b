use crate::commands::helpers::details;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Tag;
use crate::paging::Paginator;
use crate::store::{DataStore, ItemQuery};

/// Published items carrying one tag, with the same empty-is-missing rule as
/// categories.
pub fn run<S: DataStore>(
    store: &S,
    slug: &str,
    page: Option<&str>,
    per_page: usize,
) -> Result<CmdResult> {
    let tag: Tag = store.get_by_slug(slug)?;
    let items = store.query_items(&ItemQuery::published().with_tag(tag.id))?;
    let listed = details(store, items)?;
    let page = Paginator::new(per_page)
        .non_empty()
        .paginate(listed.clone(), page)?;

    let mut result = CmdResult::default().with_listed_items(listed).with_page(page);
    result.tag = Some(tag);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{at, StoreFixture};

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_category("Web", "web")
            .with_tag("Rust", "rust")
            .with_tag("Unused", "unused")
            .with_item("Tagged", "tagged", "web", true, at(2022, 1, 1), &["rust"])
            .with_item("Draft", "draft", "web", false, at(2023, 1, 1), &["rust"])
            .with_item("Plain", "plain", "web", true, at(2023, 1, 1), &[])
    }

    #[test]
    fn lists_published_items_with_the_tag() {
        let result = run(&fixture().store, "rust", None, 3).unwrap();
        assert_eq!(result.listed_items.len(), 1);
        assert_eq!(result.listed_items[0].item.slug, "tagged");
        assert_eq!(result.tag.unwrap().slug, "rust");
    }

    #[test]
    fn unused_or_unknown_tag_is_not_found() {
        let store = fixture().store;
        assert!(run(&store, "unused", None, 3).unwrap_err().is_not_found());
        assert!(run(&store, "nope", None, 3).unwrap_err().is_not_found());
    }
}
