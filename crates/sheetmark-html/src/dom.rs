//! Parser-independent markup tree
//!
//! The interpreter walks [`Node`] trees. [`parse_html`] builds one from an
//! HTML string through `scraper`; callers with another parser can build the
//! tree by hand.

use scraper::{ElementRef, Html};

/// A node of the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attr<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a non-empty attribute value
    pub fn attr_non_empty(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Check whether an attribute is present, even if empty
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Check the tag name
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

/// Elements matching `predicate`, depth-first in document order
///
/// Matching elements are still descended into.
pub fn find_elements<'a, F>(nodes: &'a [Node], predicate: F) -> Vec<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    fn walk<'a, F>(nodes: &'a [Node], predicate: &F, out: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        for node in nodes {
            if let Node::Element(el) = node {
                if predicate(el) {
                    out.push(el);
                }
                walk(&el.children, predicate, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, &predicate, &mut out);
    out
}

/// Trim the whitespace set HTML text content is cleaned with
///
/// Space, tab, line feed, carriage return, NUL and vertical tab.
pub fn trim_markup(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Parse an HTML document or fragment into a tree
///
/// Parsing is lenient: the result holds the `html` root element with `head`
/// and `body` filled in by the parser. Comments, doctypes and processing
/// instructions are dropped.
pub fn parse_html(html: &str) -> Vec<Node> {
    let document = Html::parse_document(html);
    vec![Node::Element(convert_element(document.root_element()))]
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let mut children = Vec::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            children.push(Node::Element(convert_element(child_element)));
        } else if let scraper::Node::Text(text) = child.value() {
            children.push(Node::Text(String::from(&**text)));
        }
    }

    Element {
        tag: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(name, v)| (name.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_and_text_content() {
        let td = Element::new("TD")
            .with_attr("data-xls-type", "string")
            .with_text(" 12 ")
            .with_child(Element::new("b").with_text("34"));

        assert_eq!(td.tag, "td");
        assert_eq!(td.attr("data-xls-type"), Some("string"));
        assert!(td.has_attr("data-xls-type"));
        assert_eq!(td.attr("data-xls-apply"), None);
        assert_eq!(td.text_content(), " 12 34");
        assert_eq!(td.child_elements().count(), 1);
    }

    #[test]
    fn test_empty_attribute() {
        let el = Element::new("td").with_attr("data-xls-formula", "");
        assert!(el.has_attr("data-xls-formula"));
        assert_eq!(el.attr_non_empty("data-xls-formula"), None);
    }

    #[test]
    fn test_parse_html_keeps_structure() {
        let nodes = parse_html(
            r#"<!-- note --><table data-xls-sheet="Data"><tr><td>R&amp;D</td></tr></table>"#,
        );
        let tables = find_elements(&nodes, |el| el.is("table"));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].attr("data-xls-sheet"), Some("Data"));

        // the parser wraps bare rows in tbody
        let tbody = tables[0].child_elements().next().unwrap();
        assert_eq!(tbody.tag, "tbody");
        assert_eq!(tables[0].text_content(), "R&D");
    }

    #[test]
    fn test_find_elements_document_order() {
        let nodes = vec![Node::Element(
            Element::new("div")
                .with_child(Element::new("table").with_attr("id", "1").with_child(
                    Element::new("tr").with_child(
                        Element::new("td").with_child(Element::new("table").with_attr("id", "2")),
                    ),
                ))
                .with_child(Element::new("table").with_attr("id", "3")),
        )];
        let ids: Vec<_> = find_elements(&nodes, |el| el.is("table"))
            .into_iter()
            .filter_map(|el| el.attr("id"))
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_trim_markup() {
        assert_eq!(trim_markup("\t\n x \r\0\x0B"), "x");
        // no-break space is content
        assert_eq!(trim_markup("\u{00A0}x"), "\u{00A0}x");
    }
}
