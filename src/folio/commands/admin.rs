use crate::commands::helpers::details;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ItemDetail;
use crate::paging::Paginator;
use crate::store::{DataStore, ItemQuery};

/// Narrowing options for the administrative item listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
    /// Title prefix or part of the category name, case-insensitive.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    pub published: Option<bool>,
    pub has_client: Option<bool>,
}

impl AdminFilter {
    fn matches(&self, detail: &ItemDetail) -> bool {
        if let Some(term) = self.search.as_deref().map(str::to_lowercase) {
            let title = detail.item.title.to_lowercase();
            let category = detail.category.name.to_lowercase();
            if !title.starts_with(&term) && !category.contains(&term) {
                return false;
            }
        }
        if let Some(name) = &self.category {
            if &detail.category.name != name {
                return false;
            }
        }
        if let Some(published) = self.published {
            if detail.item.is_published != published {
                return false;
            }
        }
        true
    }
}

/// Every item, drafts included, ordered newest first then by title.
pub fn run<S: DataStore>(
    store: &S,
    filter: &AdminFilter,
    page: Option<&str>,
    per_page: usize,
) -> Result<CmdResult> {
    let mut query = ItemQuery::admin();
    if let Some(has_client) = filter.has_client {
        query = query.has_client(has_client);
    }
    let listed: Vec<ItemDetail> = details(store, store.query_items(&query)?)?
        .into_iter()
        .filter(|d| filter.matches(d))
        .collect();
    let page = Paginator::new(per_page).paginate(listed.clone(), page)?;
    Ok(CmdResult::default().with_listed_items(listed).with_page(page))
}
