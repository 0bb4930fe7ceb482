//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use serde_json::{Value, json};
use wiki_enrich::core::store::{Base, FieldSchema, Table};
use wiki_enrich::{Record, TargetFields};

pub const TABLE: &str = "Articles";
pub const KEY_FIELD: &str = "Title";
pub const EXTRACT_FIELD: &str = "Extract";
pub const IMAGE_FIELD: &str = "Image";

pub fn targets() -> TargetFields {
    TargetFields::new(EXTRACT_FIELD, IMAGE_FIELD)
}

/// `Articles` table with one record per title, ids `rec0`, `rec1`, ...
pub fn article_table(titles: &[&str]) -> Table {
    let records = titles
        .iter()
        .enumerate()
        .map(|(i, title)| Record::new(format!("rec{}", i)).with_text(KEY_FIELD, *title))
        .collect();

    Table::new(
        TABLE,
        vec![
            FieldSchema::writable(KEY_FIELD),
            FieldSchema::writable(EXTRACT_FIELD),
            FieldSchema::writable(IMAGE_FIELD),
        ],
    )
    .with_records(records)
}

pub fn titled_base(titles: &[&str]) -> Base {
    Base::default().with_table(article_table(titles))
}

/// `n` generated titles: `Page 0`, `Page 1`, ...
pub fn numbered_titles(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Page {}", i)).collect()
}

/// Summary document with an extract and an original image
pub fn summary_json(title: &str, extract: &str, image: Option<&str>) -> Value {
    let mut doc = json!({
        "type": "standard",
        "title": title,
        "extract": extract,
    });
    if let Some(source) = image {
        doc["originalimage"] = json!({ "source": source, "width": 800, "height": 600 });
    }
    doc
}

/// Error document the API returns for an unknown title
pub fn not_found_json(title: &str) -> Value {
    json!({
        "type": "https://mediawiki.org/wiki/HyperSwitch/errors/not_found",
        "title": "Not found.",
        "method": "get",
        "detail": "Page or revision not found.",
        "uri": format!("/en.wikipedia.org/v1/page/summary/{}", title),
    })
}
