use crate::commands::helpers::details;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::paging::Paginator;
use crate::store::{DataStore, ItemQuery};

/// The public front page: published items, newest first, one page of them.
pub fn run<S: DataStore>(store: &S, page: Option<&str>, per_page: usize) -> Result<CmdResult> {
    let items = store.query_items(&ItemQuery::published())?;
    let listed = details(store, items)?;
    let page = Paginator::new(per_page).paginate(listed.clone(), page)?;
    Ok(CmdResult::default().with_listed_items(listed).with_page(page))
}
