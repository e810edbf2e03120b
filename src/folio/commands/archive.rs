use crate::commands::helpers::details;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::paging::Paginator;
use crate::store::{DataStore, ItemQuery};
use chrono::{Datelike, Utc};

/// Items created in `year`, newest first.
///
/// The archive lists drafts too: it starts from the unfiltered view. A year
/// after the current one yields an empty listing, never an error.
pub fn run<S: DataStore>(
    store: &S,
    year: i32,
    page: Option<&str>,
    per_page: usize,
) -> Result<CmdResult> {
    run_at(store, year, Utc::now().year(), page, per_page)
}

pub fn run_at<S: DataStore>(
    store: &S,
    year: i32,
    current_year: i32,
    page: Option<&str>,
    per_page: usize,
) -> Result<CmdResult> {
    let listed = if year > current_year {
        Vec::new()
    } else {
        details(store, store.query_items(&ItemQuery::all().created_in(year))?)?
    };
    let page = Paginator::new(per_page).paginate(listed.clone(), page)?;
    Ok(CmdResult::default().with_listed_items(listed).with_page(page))
}
