//! Pulls the JSON payload out of a rendered API page.
//!
//! A browser opening a raw JSON response wraps the body in a `<pre>` element and
//! HTML-escapes it. The wrapper is read with a real HTML parser so every entity
//! decodes the way the browser would. Pages that come back without the wrapper
//! are scanned for the first balanced `{ ... }` object instead, as long as they
//! mention `"events"`.

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

static PRE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre").expect("pre selector is valid"));

/// Marker that makes the brace-counting fallback worth trying
const EVENTS_MARKER: &str = "\"events\"";

/// Extracts the JSON object embedded in `page_source`.
///
/// Never fails: when neither the `<pre>` wrapper nor the brace-counting
/// fallback yields a JSON object, an empty map is returned and callers treat
/// it as "no data".
pub fn extract_json(page_source: &str) -> Map<String, Value> {
    if let Some(object) = extract_from_pre(page_source) {
        return object;
    }

    if page_source.contains(EVENTS_MARKER)
        && let Some(object) = extract_balanced_object(page_source)
    {
        return object;
    }

    debug!(
        "No JSON object found in page source ({} bytes)",
        page_source.len()
    );
    Map::new()
}

/// Returns the decoded text of the first `<pre>` element, if any.
pub fn find_pre_text(page_source: &str) -> Option<String> {
    let document = Html::parse_document(page_source);
    let pre = document.select(&PRE).next()?;
    Some(pre.text().collect::<String>().trim().to_string())
}

fn extract_from_pre(page_source: &str) -> Option<Map<String, Value>> {
    let body = find_pre_text(page_source)?;
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => None,
        Err(e) => {
            debug!("<pre> block is not valid JSON: {e}");
            None
        }
    }
}

/// Brace-counts from the first `{` to its balancing `}` and parses that slice.
/// Only the first balanced candidate is tried.
fn extract_balanced_object(page_source: &str) -> Option<Map<String, Value>> {
    let start = page_source.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in page_source[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return match serde_json::from_str::<Value>(&page_source[start..end]) {
                        Ok(Value::Object(object)) => Some(object),
                        _ => None,
                    };
                }
            }
            _ => {}
        }
    }

    None
}

/// Collects the integer `id` of every element of the `events` array, in
/// source order. Elements without an integer `id` are skipped.
pub fn collect_event_ids(payload: &Map<String, Value>) -> Vec<u64> {
    payload
        .get("events")
        .and_then(Value::as_array)
        .map(|events| {
            events
                .iter()
                .filter_map(|event| event.get("id").and_then(Value::as_u64))
                .collect()
        })
        .unwrap_or_default()
}
