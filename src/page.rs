use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Item;

// Attribute patterns of the server-rendered album page, compiled once.
static IMAGE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-image-id\s*=\s*"([^"]*)""#).unwrap());
static EVENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-event-id\s*=\s*"([^"]*)""#).unwrap());
static ALBUM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-album-id\s*=\s*"([^"]*)""#).unwrap());
static SOURCE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bsrc\s*=\s*"([^"]*)""#).unwrap());

/// What a reload learns from the album page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumPage {
    pub album_id: Option<String>,
    pub items: Vec<Item>,
}

/// Byte range of the tag enclosing `pos`.
fn enclosing_tag(html: &str, pos: usize) -> (usize, usize) {
    let start = html[..pos].rfind('<').unwrap_or(0);
    let end = html[pos..].find('>').map(|i| pos + i + 1).unwrap_or(html.len());
    (start, end)
}

pub fn parse_album_page(html: &str) -> AlbumPage {
    let album_id = ALBUM_ID
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|id| !id.is_empty());

    let tags: Vec<(usize, usize, String)> = IMAGE_ID
        .captures_iter(html)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let (start, end) = enclosing_tag(html, m.start());
            Some((start, end, caps[1].trim().to_string()))
        })
        .collect();

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(tags.len());
    for (i, (start, end, id)) in tags.iter().enumerate() {
        if id.is_empty() || !seen.insert(id.clone()) {
            continue;
        }
        let next_start = tags.get(i + 1).map(|(s, _, _)| *s).unwrap_or(html.len());
        let event_id = EVENT_ID
            .captures(&html[*start..*end])
            .map(|caps| caps[1].trim().to_string());
        // the item may be the <img> itself or a wrapper around it
        let source = if *start <= next_start {
            SOURCE
                .captures(&html[*start..next_start])
                .map(|caps| caps[1].to_string())
        } else {
            None
        };
        items.push(Item {
            event_id,
            source,
            ..Item::new(id.as_str())
        });
    }

    AlbumPage { album_id, items }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<div class="album-container" data-album-id="4">
  <h1>Wedding</h1>
  <div class="image-grid">
    <div class="image-item image-item-hover" data-image-id="31" data-event-id="12">
      <img src="/static/events/12/IMG_0031.jpg" alt="photo">
    </div>
    <div class="image-item image-item-hover" data-event-id="12" data-image-id="35">
      <img src="/static/events/12/IMG_0035.jpg" alt="photo">
    </div>
    <div class="image-item image-item-hover" data-image-id="40">
    </div>
    <div class="image-item" data-image-id="31" data-event-id="12"></div>
  </div>
</div>
"#;

    #[test]
    fn reads_items_in_document_order() {
        let page = parse_album_page(PAGE);
        assert_eq!(page.album_id.as_deref(), Some("4"));
        let ids: Vec<&str> = page.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["31", "35", "40"]);
    }

    #[test]
    fn attaches_event_and_source_to_their_item() {
        let page = parse_album_page(PAGE);
        assert_eq!(page.items[0].event_id.as_deref(), Some("12"));
        assert_eq!(page.items[0].label(), "IMG_0031.jpg");
        // attribute order inside the tag does not matter
        assert_eq!(page.items[1].event_id.as_deref(), Some("12"));
        assert_eq!(page.items[1].label(), "IMG_0035.jpg");
        // no image below it, and the next item's source is not borrowed
        assert_eq!(page.items[2].event_id, None);
        assert_eq!(page.items[2].source, None);
        assert_eq!(page.items[2].label(), "40");
    }

    #[test]
    fn item_tag_may_be_the_image() {
        let page = parse_album_page(
            r#"<div class="album-container" data-album-id="2">
  <img class="image-item" data-image-id="1" src="/static/e/A.jpg">
  <img class="image-item" src="/static/e/B.jpg" data-image-id="2" data-event-id="5">
</div>"#,
        );
        let sources: Vec<Option<&str>> =
            page.items.iter().map(|item| item.source.as_deref()).collect();
        assert_eq!(sources, [Some("/static/e/A.jpg"), Some("/static/e/B.jpg")]);
        assert_eq!(page.items[1].event_id.as_deref(), Some("5"));
    }

    #[test]
    fn empty_album_is_valid() {
        let page = parse_album_page(r#"<div class="album-container" data-album-id="9"></div>"#);
        assert_eq!(page.album_id.as_deref(), Some("9"));
        assert!(page.items.is_empty());

        assert_eq!(parse_album_page(""), AlbumPage::default());
    }
}
