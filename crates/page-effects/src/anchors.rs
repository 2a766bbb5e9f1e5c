//! Smooth scrolling for same-page anchor links.

use web_sys::{
    Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom::Listener;
use crate::error::Result;

/// The selector to resolve for an anchor `href`, or `None` when the link is
/// not an in-page link. A bare `#` is not one.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

/// Attach a click handler to every anchor.
pub fn bind(document: &Document, anchors: &[Element]) -> Result<Vec<Listener>> {
    anchors
        .iter()
        .map(|anchor| {
            let document = document.clone();
            let link = anchor.clone();
            Listener::new(anchor, "click", move |event: Event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                if let Some(target) = anchor_target(&document, &href) {
                    event.prevent_default();
                    scroll_to_top(&target);
                }
            })
        })
        .collect()
}

/// Resolve the element an `href` points at. Invalid selectors count as no target.
fn anchor_target(document: &Document, href: &str) -> Option<Element> {
    let selector = anchor_fragment(href)?;
    match document.query_selector(selector) {
        Ok(target) => target,
        Err(err) => {
            tracing::debug!(href, error = ?err, "anchor href is not a valid selector");
            None
        }
    }
}

fn scroll_to_top(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_links() {
        assert_eq!(anchor_fragment("#features"), Some("#features"));
        assert_eq!(anchor_fragment("#a"), Some("#a"));
    }

    #[test]
    fn test_bare_hash_ignored() {
        assert_eq!(anchor_fragment("#"), None);
    }

    #[test]
    fn test_other_links_ignored() {
        assert_eq!(anchor_fragment(""), None);
        assert_eq!(anchor_fragment("/docs#intro"), None);
        assert_eq!(anchor_fragment("https://example.com/#top"), None);
    }
}
