//! Page slicing for public listings.
//!
//! Page numbers are 1-based. The `page` query value is either a positive
//! integer or the literal `last`; anything else, or a number outside
//! `1..=num_pages`, is `NotFound`. An empty list still has one (empty) page
//! when the paginator allows empty results; otherwise an empty list is
//! itself `NotFound`.

use crate::error::{FolioError, Result};
use serde::Serialize;

pub const LAST_PAGE: &str = "last";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub per_page: usize,
    pub allow_empty: bool,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            allow_empty: true,
        }
    }

    /// Requires at least one object; an empty list is `NotFound`.
    pub fn non_empty(mut self) -> Self {
        self.allow_empty = false;
        self
    }

    pub fn num_pages(&self, count: usize) -> usize {
        if count == 0 {
            if self.allow_empty {
                1
            } else {
                0
            }
        } else {
            count.div_ceil(self.per_page)
        }
    }

    /// Slices `objects` to the requested page.
    pub fn paginate<T>(&self, objects: Vec<T>, page: Option<&str>) -> Result<Page<T>> {
        let count = objects.len();
        if count == 0 && !self.allow_empty {
            return Err(FolioError::not_found("Empty list"));
        }
        let num_pages = self.num_pages(count);
        let number = self.validate_number(page, num_pages)?;

        let start = (number - 1) * self.per_page;
        let object_list: Vec<T> = objects
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect();

        let (start_index, end_index) = if count == 0 {
            (0, 0)
        } else {
            (start + 1, start + object_list.len())
        };

        Ok(Page {
            object_list,
            number,
            num_pages,
            count,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
            start_index,
            end_index,
        })
    }

    fn validate_number(&self, page: Option<&str>, num_pages: usize) -> Result<usize> {
        let raw = match page {
            None => return Ok(1),
            Some(raw) => raw.trim(),
        };
        if raw == LAST_PAGE {
            return Ok(num_pages.max(1));
        }
        let number: usize = raw
            .parse()
            .map_err(|_| FolioError::not_found("Page is not 'last', nor can it be converted to an int"))?;
        if number < 1 || number > num_pages.max(1) {
            return Err(FolioError::not_found(format!("Invalid page ({})", number)));
        }
        Ok(number)
    }
}

/// One page of a listing, serializable straight into a template context.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub object_list: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<usize>,
    pub next_page_number: Option<usize>,
    /// 1-based index of the first object on this page, 0 when empty.
    pub start_index: usize,
    pub end_index: usize,
}

impl<T> Page<T> {
    pub fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            object_list: self.object_list.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_previous: self.has_previous,
            has_next: self.has_next,
            previous_page_number: self.previous_page_number,
            next_page_number: self.next_page_number,
            start_index: self.start_index,
            end_index: self.end_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_by_default() {
        let page = Paginator::new(3).paginate(numbers(7), None).unwrap();
        assert_eq!(page.object_list, vec![1, 2, 3]);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.count, 7);
        assert!(!page.has_previous);
        assert_eq!(page.next_page_number, Some(2));
    }

    #[test]
    fn last_keyword_selects_final_page() {
        let page = Paginator::new(3).paginate(numbers(7), Some("last")).unwrap();
        assert_eq!(page.number, 3);
        assert_eq!(page.object_list, vec![7]);
        assert_eq!((page.start_index, page.end_index), (7, 7));
        assert!(!page.has_next);
    }

    #[test]
    fn out_of_range_and_garbage_are_not_found() {
        let paginator = Paginator::new(3);
        for raw in ["0", "4", "two", "-1", ""] {
            let err = paginator.paginate(numbers(7), Some(raw)).unwrap_err();
            assert!(err.is_not_found(), "page {:?}", raw);
        }
    }

    #[test]
    fn empty_list_has_one_empty_page_when_allowed() {
        let page = Paginator::new(3).paginate(Vec::<usize>::new(), None).unwrap();
        assert_eq!(page.num_pages, 1);
        assert!(page.object_list.is_empty());
        assert_eq!(page.start_index, 0);

        let page = Paginator::new(3)
            .paginate(Vec::<usize>::new(), Some("last"))
            .unwrap();
        assert_eq!(page.number, 1);
    }

    #[test]
    fn empty_list_is_not_found_when_required() {
        let err = Paginator::new(3)
            .non_empty()
            .paginate(Vec::<usize>::new(), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
