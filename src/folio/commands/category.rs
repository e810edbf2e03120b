use crate::commands::helpers::details;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Category;
use crate::paging::Paginator;
use crate::store::{DataStore, ItemQuery};

/// Published items of one category. Both an unknown category and a category
/// with no published items are `NotFound`.
pub fn run<S: DataStore>(
    store: &S,
    slug: &str,
    page: Option<&str>,
    per_page: usize,
) -> Result<CmdResult> {
    let category: Category = store.get_by_slug(slug)?;
    let items = store.query_items(&ItemQuery::published().in_category(category.id))?;
    let listed = details(store, items)?;
    let page = Paginator::new(per_page)
        .non_empty()
        .paginate(listed.clone(), page)?;

    let mut result = CmdResult::default().with_listed_items(listed).with_page(page);
    result.category = Some(category);
    Ok(result)
}
