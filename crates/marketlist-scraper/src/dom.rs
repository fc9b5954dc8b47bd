//! DOM selection primitives over the `scraper` crate.
//!
//! A fetched page is parsed, queried, and dropped within one synchronous
//! call. Only owned [`ListingNode`] values leave this module, so a parsed
//! tree is never held across an `.await`.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// One listing-container element lifted out of a results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingNode {
    element_id: Option<String>,
    html: String,
}

impl ListingNode {
    /// Blank ids are stored as absent.
    #[must_use]
    pub fn new(element_id: Option<String>, html: impl Into<String>) -> Self {
        Self {
            element_id: element_id.filter(|id| !id.trim().is_empty()),
            html: html.into(),
        }
    }

    /// The element's `id` attribute, if it has a non-blank one.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    /// Parses the node's markup so sub-nodes can be selected from it.
    #[must_use]
    pub fn parse(&self) -> Html {
        Html::parse_fragment(&self.html)
    }
}

/// Compiles a CSS selector.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if `selector` is not valid CSS.
pub fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a full results page and returns every element matching
/// `list_selector`, in document order.
#[must_use]
pub fn select_listing_nodes(page_html: &str, list_selector: &Selector) -> Vec<ListingNode> {
    let document = Html::parse_document(page_html);
    document
        .select(list_selector)
        .map(|el| ListingNode::new(el.value().id().map(str::to_owned), el.html()))
        .collect()
}

/// First descendant of `root` matching `selector`.
#[must_use]
pub fn select_first<'a>(root: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    root.select(selector).next()
}

/// Descendant text of `element`, with text nodes joined by single spaces and
/// whitespace runs collapsed.
#[must_use]
pub fn inner_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul class="srp-results srp-list clearfix">
            <li class="s-item" id="item-a"><span class="t">First   <b>listing</b></span></li>
            <li class="s-item"><span class="t">No id</span></li>
            <li class="s-item" id="  "><span class="t">Blank id</span></li>
          </ul>
          <ul class="other"><li class="s-item" id="item-x">Elsewhere</li></ul>
        </body></html>
    "#;

    #[test]
    fn select_listing_nodes_scopes_to_selector() {
        let selector = parse_selector("ul.srp-results > li.s-item").unwrap();
        let nodes = select_listing_nodes(PAGE, &selector);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].element_id(), Some("item-a"));
    }

    #[test]
    fn missing_and_blank_ids_are_absent() {
        let selector = parse_selector("ul.srp-results > li.s-item").unwrap();
        let nodes = select_listing_nodes(PAGE, &selector);
        assert!(nodes[1].element_id().is_none());
        assert!(nodes[2].element_id().is_none());
    }

    #[test]
    fn inner_text_collapses_whitespace_across_children() {
        let selector = parse_selector("ul.srp-results > li.s-item").unwrap();
        let nodes = select_listing_nodes(PAGE, &selector);
        let fragment = nodes[0].parse();
        let title = select_first(fragment.root_element(), &parse_selector(".t").unwrap())
            .expect("title span present");
        assert_eq!(inner_text(title), "First listing");
    }

    #[test]
    fn select_listing_nodes_empty_page() {
        let selector = parse_selector("ul.srp-results > li.s-item").unwrap();
        assert!(select_listing_nodes("<html><body></body></html>", &selector).is_empty());
    }

    #[test]
    fn parse_selector_rejects_invalid_css() {
        let err = parse_selector("li[[").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidSelector { .. }));
    }
}
