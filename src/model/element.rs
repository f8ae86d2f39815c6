//! Element tree for parsed OLX documents.

use quick_xml::escape::{escape, partial_escape};

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// Character data (entities already resolved)
    Text(String),
}

/// An XML element with ordered attributes and children.
///
/// Accessors follow ElementTree conventions: [`Element::text`] is the text
/// before the first child element, and searches walk descendants in
/// document (pre-)order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the source
    pub name: String,

    /// Attributes in source order, values unescaped
    pub attributes: Vec<(String, String)>,

    /// Child nodes in source order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Append a text node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append text, merging with a preceding text node.
    pub fn push_text(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => self.children.push(Node::Text(text.to_string())),
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether this element has the given tag name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Text before the first child element (empty if none).
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(_) => break,
            }
        }
        out
    }

    /// All character data of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Direct child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Tag names of direct child elements, in order.
    pub fn child_tags(&self) -> Vec<&str> {
        self.child_elements().map(|e| e.name.as_str()).collect()
    }

    /// Iterate over this element and all descendants in document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Iterate over descendants (excluding `self`) in document order.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        self.iter().skip(1)
    }

    /// First descendant with the given tag.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.is(name))
    }

    /// All descendants with the given tag, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.descendants().filter(|e| e.is(name)).collect()
    }

    /// Number of descendants with the given tag.
    pub fn count(&self, name: &str) -> usize {
        self.descendants().filter(|e| e.is(name)).count()
    }

    /// Descendants with the given tag whose `class` attribute equals `class`.
    pub fn find_all_with_class(&self, name: &str, class: &str) -> Vec<&Element> {
        self.descendants()
            .filter(|e| e.is(name) && e.attr("class") == Some(class))
            .collect()
    }

    /// The first element named `name` in document order, followed by its
    /// next siblings for as long as they carry the same name.
    ///
    /// Text between siblings is ignored. Returns an empty vector when no
    /// such element exists.
    pub fn leading_run(&self, name: &str) -> Vec<&Element> {
        self.find_run(name).unwrap_or_default()
    }

    fn find_run(&self, name: &str) -> Option<Vec<&Element>> {
        let children: Vec<&Element> = self.child_elements().collect();
        for (idx, child) in children.iter().enumerate() {
            if child.is(name) {
                return Some(
                    children[idx..]
                        .iter()
                        .take_while(|e| e.is(name))
                        .copied()
                        .collect(),
                );
            }
            if let Some(run) = child.find_run(name) {
                return Some(run);
            }
        }
        None
    }

    /// Serialize this element (tags included) back to XML.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    /// Serialize only the children of this element.
    pub fn inner_xml(&self) -> String {
        let mut out = String::new();
        self.write_children(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        self.write_children(out);
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Serialize the children, leaving out child elements named `skip`.
    pub fn inner_xml_except(&self, skip: &str) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
                Node::Element(e) if e.is(skip) => {}
                Node::Element(e) => e.write_xml(&mut out),
            }
        }
        out
    }

    fn write_children(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
                Node::Element(e) => e.write_xml(out),
            }
        }
    }
}

/// Pre-order iterator over an element subtree.
pub struct Iter<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let before = self.stack.len();
        self.stack.extend(current.child_elements());
        self.stack[before..].reverse();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("problem")
            .with_child(Element::new("p").with_text("First"))
            .with_child(
                Element::new("div")
                    .with_child(Element::new("p").with_text("Nested"))
                    .with_child(Element::new("ul").with_child(Element::new("li").with_text("a"))),
            )
            .with_child(Element::new("p").with_text("Last"))
    }

    #[test]
    fn test_iter_is_preorder() {
        let doc = sample();
        let names: Vec<&str> = doc.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["problem", "p", "div", "p", "ul", "li", "p"]);
    }

    #[test]
    fn test_find_and_count() {
        let doc = sample();
        assert_eq!(doc.count("p"), 3);
        assert_eq!(doc.find("li").unwrap().text(), "a");
        assert!(doc.find("problem").is_none());
        let texts: Vec<String> = doc.find_all("p").iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["First", "Nested", "Last"]);
    }

    #[test]
    fn test_text_stops_at_first_child() {
        let el = Element::new("hint")
            .with_text("  ")
            .with_child(Element::new("b").with_text("bold"))
            .with_text(" tail");
        assert_eq!(el.text(), "  ");
        assert_eq!(el.text_content(), "  bold tail");
    }

    #[test]
    fn test_leading_run_stops_at_non_matching_sibling() {
        let doc = Element::new("problem")
            .with_child(Element::new("p").with_text("one"))
            .with_text("\n")
            .with_child(Element::new("p").with_text("two"))
            .with_child(Element::new("numericalresponse"))
            .with_child(Element::new("p").with_text("three"));
        let run: Vec<String> = doc.leading_run("p").iter().map(|p| p.text()).collect();
        assert_eq!(run, vec!["one", "two"]);
    }

    #[test]
    fn test_leading_run_finds_nested_first() {
        let doc = Element::new("problem")
            .with_child(
                Element::new("div")
                    .with_child(Element::new("p").with_text("inner"))
                    .with_child(Element::new("p").with_text("inner2")),
            )
            .with_child(Element::new("p").with_text("outer"));
        let run: Vec<String> = doc.leading_run("p").iter().map(|p| p.text()).collect();
        assert_eq!(run, vec!["inner", "inner2"]);
        assert!(Element::new("problem").leading_run("p").is_empty());
    }

    #[test]
    fn test_to_xml_escapes() {
        let el = Element::new("label")
            .with_attr("title", "a \"b\"")
            .with_text("x < y & ")
            .with_child(Element::new("b").with_text("z"))
            .with_child(Element::new("br"));
        assert_eq!(
            el.to_xml(),
            "<label title=\"a &quot;b&quot;\">x &lt; y &amp; <b>z</b><br/></label>"
        );
        assert_eq!(el.inner_xml(), "x &lt; y &amp; <b>z</b><br/>");
    }

    #[test]
    fn test_with_text_merges_owned_and_borrowed() {
        let el = Element::new("p").with_text(String::from("a")).with_text("b");
        assert_eq!(el.children, vec![Node::Text("ab".to_string())]);
    }

    #[test]
    fn test_inner_xml_except_skips_named_children() {
        let el = Element::new("choice")
            .with_child(Element::new("b").with_text("F"))
            .with_text(" = ma ")
            .with_child(Element::new("choicehint").with_text("Newton"));
        assert_eq!(el.inner_xml_except("choicehint"), "<b>F</b> = ma ");
    }

    #[test]
    fn test_find_all_with_class() {
        let doc = Element::new("problem")
            .with_child(Element::new("div").with_attr("class", "detailed-solution"))
            .with_child(Element::new("div").with_attr("class", "other"));
        assert_eq!(doc.find_all_with_class("div", "detailed-solution").len(), 1);
    }
}
