//! A minimal markup tree.
//!
//! Layout variants build [`Node`] trees instead of touching a live document.
//! Hosts serialize them with [`Node::to_html`] or walk them directly, and
//! incremental updates (such as re-rendering the list after "Load More")
//! swap one subtree with [`Element::replace_by_id`].
//!
//! # Examples
//!
//! ```
//! use plaudit_render::markup::{Element, Node};
//!
//! let card = Element::new("div")
//!     .class("plaudit-card")
//!     .attr("data-index", "0")
//!     .child(Element::new("p").text("Fish & chips <3"));
//!
//! assert_eq!(
//!     Node::from(card).to_html(),
//!     r#"<div class="plaudit-card" data-index="0"><p>Fish &amp; chips &lt;3</p></div>"#,
//! );
//! ```

use std::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Escaped text.
    Text(String),
}

impl Node {
    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element, if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Serializes the node to HTML, escaping text and attribute values.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Concatenates all text below this node.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_into(out, text),
            Self::Element(element) => element.write_html(out),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercase.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an existing value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Adds a class to the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        match self.attrs.iter_mut().find(|(name, _)| name == "class") {
            Some((_, value)) if !value.split_whitespace().any(|c| c == class) => {
                value.push(' ');
                value.push_str(class);
            }
            Some(_) => {}
            None => self.attrs.push(("class".to_string(), class.to_string())),
        }
        self
    }

    /// Adds a class when `condition` holds.
    #[must_use]
    pub fn class_if(self, condition: bool, class: &str) -> Self {
        if condition { self.class(class) } else { self }
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends every child of an iterator.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Sets an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Removes an attribute, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let position = self.attrs.iter().position(|(existing, _)| existing == name)?;
        Some(self.attrs.remove(position).1)
    }

    /// Sets or removes a boolean attribute such as `disabled`.
    pub fn toggle_attr(&mut self, name: &str, on: bool) {
        if on {
            self.set_attr(name, "");
        } else {
            self.remove_attr(name);
        }
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Removes every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Finds the first element (this one included) with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    /// Finds the first element with the given id, mutably.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// Collects every element (this one included) carrying `class`, in
    /// document order.
    #[must_use]
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    /// Finds the first element carrying `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_class(class))
    }

    /// Replaces the element with the given id by `replacement`.
    ///
    /// Returns `false` if no descendant has that id. The root itself is
    /// never replaced.
    pub fn replace_by_id(&mut self, id: &str, replacement: Element) -> bool {
        let target = self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        });
        match target {
            Some(target) => {
                *target = replacement;
                true
            }
            None => false,
        }
    }

    /// Iterates over the element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Serializes the element to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_class(class, found);
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"");
            escape_into(out, value);
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// ```
/// use plaudit_render::markup::escape;
///
/// assert_eq!(escape(r#"<a href="x">O'Neil & co</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::new("section")
            .id("root")
            .child(
                Element::new("ul")
                    .id("list")
                    .class("items")
                    .child(Element::new("li").class("item").text("a"))
                    .child(Element::new("li").class("item").text("b")),
            )
            .child(Element::new("img").attr("src", "x.png"))
    }

    #[test]
    fn void_tags_have_no_closing_tag() {
        insta::assert_snapshot!(
            tree().to_html(),
            @r#"<section id="root"><ul id="list" class="items"><li class="item">a</li><li class="item">b</li></ul><img src="x.png"></section>"#
        );
    }

    #[test]
    fn lookup_by_id_and_class() {
        let tree = tree();
        assert_eq!(tree.find_by_id("list").map(|e| e.tag.as_str()), Some("ul"));
        assert!(tree.find_by_id("missing").is_none());
        assert_eq!(tree.find_all_by_class("item").len(), 2);
        assert_eq!(Node::from(tree).text_content(), "ab");
    }

    #[test]
    fn replace_swaps_one_subtree() {
        let mut tree = tree();
        let replaced = tree.replace_by_id("list", Element::new("ol").id("list").text("new"));
        assert!(replaced);
        assert_eq!(tree.find_by_id("list").map(|e| e.tag.as_str()), Some("ol"));
        assert!(!tree.replace_by_id("nope", Element::new("p")));
        assert!(!tree.replace_by_id("root", Element::new("p")));
    }

    #[test]
    fn class_is_not_duplicated() {
        let element = Element::new("div").class("a").class("b").class("a");
        assert_eq!(element.get_attr("class"), Some("a b"));
        assert!(element.has_class("b"));
        assert!(!element.has_class("c"));
    }

    proptest::proptest! {
        #[test]
        fn escaped_text_never_opens_markup(body in ".*", title in ".*") {
            let html = Element::new("p").attr("title", title).text(body).to_html();
            let inner = &html[html.find('>').unwrap() + 1..html.len() - "</p>".len()];
            proptest::prop_assert!(!inner.contains('<') && !inner.contains('>'));
            proptest::prop_assert_eq!(html.matches('"').count(), 2);
        }
    }
}
