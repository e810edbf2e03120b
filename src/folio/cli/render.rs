//! # Terminal Rendering
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! need Unicode-aware processing. The `.tmp` templates arrange the computed
//! pieces and select styles through the `style` filter, which maps a style
//! name onto `colored`.

use super::templates::{ITEM_DETAIL_TEMPLATE, ITEM_LIST_TEMPLATE, RECORDS_TEMPLATE};
use chrono::{DateTime, Utc};
use colored::Colorize;
use folio::commands::{CmdMessage, MessageLevel};
use folio::model::ItemDetail;
use folio::paging::Page;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const TITLE_WIDTH: usize = 36;
pub const CATEGORY_WIDTH: usize = 16;
pub const TIME_WIDTH: usize = 14;
pub const ID_WIDTH: usize = 8;

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("item_list.tmp", ITEM_LIST_TEMPLATE),
        ("item_detail.tmp", ITEM_DETAIL_TEMPLATE),
        ("records.tmp", RECORDS_TEMPLATE),
    ] {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "terminal template failed to compile");
        }
    }
    env.add_filter("style", style);
    env
});

fn style(value: String, name: String) -> String {
    match name.as_str() {
        "bold" => value.bold().to_string(),
        "dim" => value.dimmed().to_string(),
        "green" => value.green().to_string(),
        "yellow" => value.yellow().to_string(),
        "red" => value.red().to_string(),
        "cyan" => value.cyan().to_string(),
        _ => value,
    }
}

fn render<T: Serialize>(name: &str, data: &T) -> String {
    ENV.get_template(name)
        .and_then(|t| t.render(data))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

#[derive(Serialize)]
struct ItemRow {
    id: String,
    title: String,
    created: String,
    published: String,
    published_style: &'static str,
    category: String,
    details: String,
}

#[derive(Serialize)]
struct ItemListData {
    rows: Vec<ItemRow>,
    empty: bool,
    footer: String,
}

/// One line per item: id, title, age, state, category, then a summary of
/// the description length, tag count and image.
pub fn render_item_list(page: &Page<ItemDetail>) -> String {
    let rows = page.object_list.iter().map(item_row).collect::<Vec<_>>();
    let data = ItemListData {
        empty: rows.is_empty(),
        rows,
        footer: format!(
            "Page {} of {} ({} item(s))",
            page.number, page.num_pages, page.count
        ),
    };
    render("item_list.tmp", &data)
}

fn item_row(detail: &ItemDetail) -> ItemRow {
    let item = &detail.item;
    let image = item.image.as_deref().unwrap_or("no image");
    let (published, published_style) = if item.is_published {
        ("published", "green")
    } else {
        ("draft", "yellow")
    };
    ItemRow {
        id: item.id.simple().to_string()[..ID_WIDTH].to_string(),
        title: pad_to_width(&item.title, TITLE_WIDTH),
        created: format!("{:>width$}", format_time_ago(item.created_at), width = TIME_WIDTH),
        published: format!("{:<9}", published),
        published_style,
        category: pad_to_width(&detail.category.name, CATEGORY_WIDTH),
        details: format!(
            "{} chars, {} tag(s), {}",
            item.description.chars().count(),
            detail.tags.len(),
            image
        ),
    }
}

#[derive(Serialize)]
struct ItemDetailData {
    title: String,
    status: &'static str,
    status_style: &'static str,
    slug: String,
    category: String,
    tags: String,
    client: String,
    image: String,
    created: String,
    description: String,
}

pub fn render_item_detail(detail: &ItemDetail) -> String {
    let item = &detail.item;
    let tags = detail
        .tags
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let data = ItemDetailData {
        title: item.title.clone(),
        status: if item.is_published { "[published]" } else { "[draft]" },
        status_style: if item.is_published { "green" } else { "yellow" },
        slug: item.slug.clone(),
        category: format!("{} ({})", detail.category.name, detail.category.slug),
        tags: or_dash(tags),
        client: or_dash(detail.client.as_ref().map(|c| c.name.clone()).unwrap_or_default()),
        image: or_dash(item.image.clone().unwrap_or_default()),
        created: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
        description: item.description.clone(),
    };
    render("item_detail.tmp", &data)
}

#[derive(Serialize)]
struct RecordLine {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct RecordsData<'a> {
    lines: Vec<RecordLine>,
    empty_message: &'a str,
}

/// Two-column listing used for categories, tags, clients and configuration.
pub fn render_records<K, V>(records: impl IntoIterator<Item = (K, V)>, empty_message: &str) -> String
where
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = records
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    let key_width = pairs.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let lines = pairs
        .into_iter()
        .map(|(key, value)| RecordLine {
            key: pad_to_width(&key, key_width),
            value,
        })
        .collect();
    render("records.tmp", &RecordsData { lines, empty_message })
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// Truncates to `width` columns (with an ellipsis) and pads the rest.
fn pad_to_width(s: &str, width: usize) -> String {
    let text = if s.width() > width {
        truncate_to_width(s, width)
    } else {
        s.to_string()
    };
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::model::{Category, Item, Tag};
    use folio::paging::Paginator;

    fn detail(title: &str, published: bool) -> ItemDetail {
        let category = Category::new("Web", "web");
        let mut item = Item::new(title, title.to_lowercase().replace(' ', "-"), category.id);
        item.is_published = published;
        item.description = "Twelve chars".to_string();
        ItemDetail {
            item,
            category,
            tags: vec![Tag::new("Rust", "rust")],
            client: None,
        }
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(pad_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn item_list_summarizes_each_item() {
        colored::control::set_override(false);
        let page = Paginator::new(10)
            .paginate(vec![detail("Site X", true), detail("Draft Y", false)], None)
            .unwrap();
        let out = render_item_list(&page);
        assert!(out.contains("Site X"));
        assert!(out.contains("published"));
        assert!(out.contains("draft"));
        assert!(out.contains("12 chars, 1 tag(s), no image"));
        assert!(out.contains("Page 1 of 1 (2 item(s))"));
    }

    #[test]
    fn empty_list_says_so() {
        colored::control::set_override(false);
        let page = Paginator::new(10).paginate(Vec::<ItemDetail>::new(), None).unwrap();
        assert_eq!(render_item_list(&page), "No portfolio items.\n");
    }

    #[test]
    fn detail_shows_placeholders_for_missing_values() {
        colored::control::set_override(false);
        let out = render_item_detail(&detail("Site X", false));
        assert!(out.starts_with("Site X [draft]"));
        assert!(out.contains("client:      -"));
        assert!(out.contains("category:    Web (web)"));
        assert!(out.contains("Twelve chars"));
    }

    #[test]
    fn records_align_keys() {
        colored::control::set_override(false);
        let out = render_records([("a", "1"), ("long", "2")], "none");
        assert_eq!(out, "a     1\nlong  2\n");
        assert_eq!(render_records(Vec::<(String, String)>::new(), "none"), "none\n");
    }
}
