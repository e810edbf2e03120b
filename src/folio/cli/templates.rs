//! Terminal templates, kept as standalone files and embedded here.
//!
//! Layout math (widths, truncation) happens in Rust before rendering; the
//! templates only arrange the pre-computed pieces and pick styles.

pub const ITEM_LIST_TEMPLATE: &str = include_str!("templates/item_list.tmp");
pub const ITEM_DETAIL_TEMPLATE: &str = include_str!("templates/item_detail.tmp");
pub const RECORDS_TEMPLATE: &str = include_str!("templates/records.tmp");
