//! Structured markup tree.
//!
//! Page templates build a [`Markup`] value instead of concatenating strings.
//! Serialization escapes text and attribute values; [`Markup::Raw`] is the
//! one escape hatch, used for already-rendered rich text.

use std::fmt::Write;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
    /// Pre-rendered HTML, emitted verbatim.
    Raw(String),
    Fragment(Vec<Markup>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Adds the attribute only when `value` is `Some`.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self {
        Markup::Element(el)
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Markup::Text(s.to_string())
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup::Text(s)
    }
}

impl Markup {
    pub fn empty() -> Markup {
        Markup::Fragment(Vec::new())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Text(t) => out.push_str(&escape_text(t)),
            Markup::Raw(html) => out.push_str(html),
            Markup::Fragment(items) => {
                for item in items {
                    item.write_html(out);
                }
            }
            Markup::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag.as_str()) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// Depth-first search for the first element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        match self {
            Markup::Element(el) if el.tag == tag => Some(el),
            Markup::Element(el) => el.children.iter().find_map(|c| c.find(tag)),
            Markup::Fragment(items) => items.iter().find_map(|c| c.find(tag)),
            Markup::Text(_) | Markup::Raw(_) => None,
        }
    }
}

/// Escapes `&`, `<` and `>` for use in text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text content plus double quotes for use inside an attribute.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
