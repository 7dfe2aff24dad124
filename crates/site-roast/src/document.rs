//! Queryable HTML document built on `scraper`.
//!
//! Parsing never fails: invalid UTF-8 is decoded lossily and the HTML5
//! tree builder repairs malformed markup, so the worst case is an empty tree.

use scraper::{ElementRef, Html, Selector};

/// A parsed page plus the markup it was parsed from.
pub struct Document {
    html: Html,
    raw: String,
}

impl Document {
    /// Parse raw response bytes.
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    pub fn parse_str(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            raw: markup.to_string(),
        }
    }

    /// The markup the document was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parser errors recovered from while building the tree.
    pub fn parse_warnings(&self) -> usize {
        self.html.errors.len()
    }

    /// All elements matching a CSS selector, in document order.
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<Node<'_>> {
        match Selector::parse(css) {
            Ok(sel) => self.html.select(&sel).map(Node).collect(),
            Err(e) => {
                tracing::debug!("invalid selector {css:?}: {e:?}");
                Vec::new()
            }
        }
    }

    /// Count elements matching a CSS selector.
    pub fn count(&self, css: &str) -> usize {
        match Selector::parse(css) {
            Ok(sel) => self.html.select(&sel).count(),
            Err(_) => 0,
        }
    }

    /// First element with the given tag name.
    pub fn find_first(&self, tag: &str) -> Option<Node<'_>> {
        self.select(tag).into_iter().next()
    }

    /// Every element with the given tag name.
    pub fn find_all(&self, tag: &str) -> Vec<Node<'_>> {
        self.select(tag)
    }

    /// Elements named `tag` whose attribute `attr` equals `value` exactly.
    pub fn find_by_attr(&self, tag: &str, attr: &str, value: &str) -> Vec<Node<'_>> {
        self.find_all(tag)
            .into_iter()
            .filter(|node| node.attr(attr) == Some(value))
            .collect()
    }

    /// First `<meta>` whose `name` attribute matches (case-insensitive).
    pub fn meta_by_name(&self, name: &str) -> Option<Node<'_>> {
        self.find_all("meta").into_iter().find(|node| {
            node.attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
    }

    /// First `<meta>` whose `property` attribute equals `property`.
    pub fn meta_by_property(&self, property: &str) -> Option<Node<'_>> {
        self.find_by_attr("meta", "property", property)
            .into_iter()
            .next()
    }
}

/// A single element in a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Lowercase tag name.
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    /// Descendant text, concatenated and trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whitespace-separated, lowercased tokens of the `rel` attribute.
    pub fn rel_tokens(&self) -> Vec<String> {
        self.attr("rel")
            .map(|rel| rel.split_whitespace().map(str::to_ascii_lowercase).collect())
            .unwrap_or_default()
    }

    /// Heading level for `h1`..`h6`, `None` for anything else.
    pub fn heading_level(&self) -> Option<u8> {
        let name = self.name();
        let rest = name.strip_prefix('h')?;
        match rest.parse::<u8>() {
            Ok(level @ 1..=6) => Some(level),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
        <title>  Hello   </title>
        <meta name="Description" content="desc">
        <meta property="og:title" content="OG">
        </head><body>
        <h1>Main</h1><h3>Sub</h3>
        <a href="/a" rel="NoOpener noreferrer">A</a>
        <a href="/b">B</a>
        </body></html>
    "#;

    #[test]
    fn test_find_first_and_text() {
        let doc = Document::parse_str(PAGE);
        let title = doc.find_first("title").unwrap();
        assert_eq!(title.name(), "title");
        assert_eq!(title.text(), "Hello");
        assert!(doc.find_first("video").is_none());
    }

    #[test]
    fn test_meta_lookup() {
        let doc = Document::parse_str(PAGE);
        assert_eq!(doc.meta_by_name("description").unwrap().attr("content"), Some("desc"));
        assert_eq!(doc.meta_by_property("og:title").unwrap().attr("content"), Some("OG"));
        assert!(doc.meta_by_property("og:image").is_none());
    }

    #[test]
    fn test_rel_tokens_and_headings() {
        let doc = Document::parse_str(PAGE);
        let links = doc.find_all("a");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel_tokens(), vec!["noopener", "noreferrer"]);
        assert!(links[1].rel_tokens().is_empty());

        let levels: Vec<u8> = doc
            .select("h1, h2, h3, h4, h5, h6")
            .iter()
            .filter_map(|n| n.heading_level())
            .collect();
        assert_eq!(levels, vec![1, 3]);
    }

    #[test]
    fn test_malformed_markup_never_fails() {
        let doc = Document::parse(b"<html><body><div><p>unclosed <b>tags<img src=x></i></table>");
        assert_eq!(doc.find_all("img").len(), 1);

        let empty = Document::parse(b"");
        assert!(empty.find_first("title").is_none());
        assert!(empty.find_all("a").is_empty());
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse_str(PAGE);
        assert!(doc.select("a[href=").is_empty());
        assert_eq!(doc.count("::::"), 0);
    }

    #[test]
    fn test_has_attr() {
        let doc = Document::parse_str(r#"<script src="/a.js"></script><script>inline()</script>"#);
        let scripts = doc.find_all("script");
        assert!(scripts[0].has_attr("src"));
        assert!(!scripts[1].has_attr("src"));
    }

    #[test]
    fn test_find_by_attr() {
        let doc = Document::parse_str(PAGE);
        assert_eq!(doc.find_by_attr("a", "href", "/b").len(), 1);
        assert!(doc.find_by_attr("a", "href", "/c").is_empty());
    }
}
