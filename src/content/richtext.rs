//! Rich-text document model and HTML renderer.
//!
//! Documents are trees of typed element nodes with formatted text leaves:
//!
//! ```text
//! [ { "type": "h2", "children": [ { "text": "Hello", "bold": true } ] },
//!   { "type": "upload", "value": { "filename": "a.jpg" } },
//!   { "children": [ { "text": "it's plain" } ] } ]
//! ```
//!
//! Decoding happens once, from `serde_json::Value`, and never fails; an
//! upload without image data is kept as an invalid image. [`render`] is a
//! pure function of the tree and the image base directory.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::content::image::{self, ImageError, ImageSource};
use crate::view::markup::escape_text;

/// Formatting flags on a text leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub code: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLeaf {
    pub text: String,
    pub marks: Marks,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Heading { level: u8, children: Vec<Node> },
    List { ordered: bool, children: Vec<Node> },
    ListItem(Vec<Node>),
    Link { url: String, children: Vec<Node> },
    Relationship { relation_to: String, value: Value },
    Upload(ImageSource),
    Paragraph(Vec<Node>),
    /// Unsupported node type, kept verbatim so it can be dumped.
    Unknown { kind: String, raw: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(TextLeaf),
    Element(Element),
}

/// A whole rich-text document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText(pub Vec<Node>);

impl RichText {
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes a document. Anything but an array is an empty document.
    pub fn from_value(value: &Value) -> RichText {
        RichText(decode_children(Some(value)))
    }

    /// Returns the first image contract violation in document order.
    pub fn check(&self) -> Result<(), ImageError> {
        check_nodes(&self.0)
    }

    pub fn render(&self, img_dir: &str) -> String {
        render(&self.0, img_dir)
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RichText::from_value(&value))
    }
}

fn decode_children(value: Option<&Value>) -> Vec<Node> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Node::from_value).collect())
        .unwrap_or_default()
}

fn check_nodes(nodes: &[Node]) -> Result<(), ImageError> {
    for node in nodes {
        let Node::Element(el) = node else { continue };
        match el {
            Element::Upload(image) => {
                if let Some(e) = image.error() {
                    return Err(e.clone());
                }
            }
            Element::Heading { children, .. }
            | Element::List { children, .. }
            | Element::ListItem(children)
            | Element::Link { children, .. }
            | Element::Paragraph(children) => check_nodes(children)?,
            Element::Relationship { .. } | Element::Unknown { .. } => {}
        }
    }
    Ok(())
}

fn flag(obj: &Value, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

impl Node {
    /// Decodes a single node. Non-object values yield `None` and are skipped.
    pub fn from_value(value: &Value) -> Option<Node> {
        if !value.is_object() {
            return None;
        }

        if let Some(text) = value.get("text") {
            return Some(Node::Text(TextLeaf {
                text: text.as_str().unwrap_or_default().to_string(),
                marks: Marks {
                    bold: flag(value, "bold"),
                    code: flag(value, "code"),
                    italic: flag(value, "italic"),
                    underline: flag(value, "underline"),
                    strikethrough: flag(value, "strikethrough"),
                },
            }));
        }

        let children = || decode_children(value.get("children"));
        let kind = value.get("type").and_then(Value::as_str);
        let element = match kind {
            Some(h @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) => Element::Heading {
                level: h.as_bytes()[1] - b'0',
                children: children(),
            },
            Some("ul") => Element::List {
                ordered: false,
                children: children(),
            },
            Some("ol") => Element::List {
                ordered: true,
                children: children(),
            },
            Some("li") => Element::ListItem(children()),
            Some("link") => Element::Link {
                url: value
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                children: children(),
            },
            Some("relationship") => Element::Relationship {
                relation_to: value
                    .get("relationTo")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                value: value.get("value").cloned().unwrap_or(Value::Null),
            },
            Some("upload") => {
                let payload = value.get("value").unwrap_or(&Value::Null);
                Element::Upload(ImageSource::ingest(payload))
            }
            Some("p") | None => Element::Paragraph(children()),
            Some(other) => Element::Unknown {
                kind: other.to_string(),
                raw: value.clone(),
            },
        };
        Some(Node::Element(element))
    }
}

/// Renders a sequence of nodes, concatenating each node's markup in order.
pub fn render(nodes: &[Node], img_dir: &str) -> String {
    nodes.iter().fold(String::new(), |mut out, node| {
        out.push_str(&render_node(node, img_dir));
        out
    })
}

pub fn render_node(node: &Node, img_dir: &str) -> String {
    match node {
        Node::Text(leaf) => render_leaf(leaf),
        Node::Element(el) => {
            let mut html = render_element(el, img_dir);
            html.push('\n');
            html
        }
    }
}

/// Straight apostrophes become typographic right single quotes, then
/// active marks wrap the text with bold outermost and strikethrough innermost.
fn render_leaf(leaf: &TextLeaf) -> String {
    let mut html = leaf.text.replace('\'', "\u{2019}");
    let m = leaf.marks;

    if m.strikethrough {
        html = format!(r#"<span style="text-decoration: line-through;">{html}</span>"#);
    }
    if m.underline {
        html = format!(r#"<span style="text-decoration: underline;">{html}</span>"#);
    }
    if m.italic {
        html = format!("<em>{html}</em>");
    }
    if m.code {
        html = format!("<code>{html}</code>");
    }
    if m.bold {
        html = format!("<strong>{html}</strong>");
    }
    html
}

fn render_element(el: &Element, img_dir: &str) -> String {
    match el {
        Element::Heading { level, children } => {
            format!("<h{level}>{}</h{level}>", render(children, img_dir))
        }
        Element::List { ordered, children } => {
            let tag = if *ordered { "ol" } else { "ul" };
            format!("<{tag}>{}</{tag}>", render(children, img_dir))
        }
        Element::ListItem(children) => format!("<li>{}</li>", render(children, img_dir)),
        Element::Link { url, children } => {
            format!(r#"<a href="{url}">{}</a>"#, render(children, img_dir))
        }
        Element::Relationship { relation_to, value } => {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("<strong>Relationship to {relation_to}: {value}</strong><br/>")
        }
        Element::Upload(source) => image::render(source, img_dir),
        Element::Paragraph(children) => format!("<p>{}</p>", render(children, img_dir)),
        Element::Unknown { kind, raw } => {
            warn!("Unsupported rich-text node type '{}'", kind);
            format!(
                "<strong>{}</strong>:<br/>{}",
                escape_text(kind),
                escape_text(&raw.to_string())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> RichText {
        RichText::from_value(&value)
    }

    fn leaf(text: &str) -> Node {
        Node::Text(TextLeaf {
            text: text.to_string(),
            marks: Marks::default(),
        })
    }

    #[test]
    fn test_apostrophe_becomes_typographic() {
        assert_eq!(render(&[leaf("it's")], ""), "it\u{2019}s");
    }

    #[test]
    fn test_bold_wraps_italic() {
        let d = doc(json!([{ "text": "text", "bold": true, "italic": true }]));
        assert_eq!(d.render(""), "<strong><em>text</em></strong>");
    }

    #[test]
    fn test_all_marks_nest_in_fixed_order() {
        let d = doc(json!([{
            "text": "x", "bold": true, "code": true, "italic": true,
            "underline": true, "strikethrough": true
        }]));
        assert_eq!(
            d.render(""),
            "<strong><code><em><span style=\"text-decoration: underline;\">\
             <span style=\"text-decoration: line-through;\">x</span></span></em></code></strong>"
        );
    }

    #[test]
    fn test_link_renders_anchor() {
        let d = doc(json!([{ "type": "link", "url": "/x", "children": [{ "text": "go" }] }]));
        assert_eq!(d.render(""), "<a href=\"/x\">go</a>\n");
    }

    #[test]
    fn test_sequence_is_order_preserving_concat() {
        let a = doc(json!([{ "type": "h1", "children": [{ "text": "A" }] }]));
        let b = doc(json!([{ "text": "B" }]));
        let both = doc(json!([
            { "type": "h1", "children": [{ "text": "A" }] },
            { "text": "B" }
        ]));
        assert_eq!(both.render(""), format!("{}{}", a.render(""), b.render("")));
        assert_eq!(both.render(""), "<h1>A</h1>\nB");
    }

    #[test]
    fn test_plain_markup_is_not_escaped_twice() {
        let d = doc(json!([{ "text": "&amp; <b>" }]));
        assert_eq!(d.render(""), "&amp; <b>");
    }

    #[test]
    fn test_lists_and_headings() {
        let d = doc(json!([
            { "type": "h6", "children": [{ "text": "six" }] },
            { "type": "ol", "children": [
                { "type": "li", "children": [{ "text": "one" }] }
            ]},
            { "type": "ul", "children": [] }
        ]));
        assert_eq!(
            d.render(""),
            "<h6>six</h6>\n<ol><li>one</li>\n</ol>\n<ul></ul>\n"
        );
    }

    #[test]
    fn test_missing_type_is_paragraph() {
        let d = doc(json!([{ "children": [{ "text": "body" }] }, { "type": "p" }]));
        assert_eq!(d.render(""), "<p>body</p>\n<p></p>\n");
    }

    #[test]
    fn test_relationship_inline_string() {
        let d = doc(json!([{ "type": "relationship", "relationTo": "products", "value": "abc" }]));
        assert_eq!(
            d.render(""),
            "<strong>Relationship to products: abc</strong><br/>\n"
        );
    }

    #[test]
    fn test_upload_delegates_to_image_renderer() {
        let d = doc(json!([{ "type": "upload", "value": { "filename": "p.jpg" }, "children": [{ "text": "ignored" }] }]));
        assert_eq!(d.render("/img/"), "<img src=\"/img/p.jpg\">\n");
    }

    #[test]
    fn test_upload_without_image_data_is_reported_not_rendered() {
        let d = doc(json!([
            { "text": "before" },
            { "type": "li", "children": [ { "type": "upload", "value": {} } ] }
        ]));
        assert!(matches!(d.check(), Err(ImageError::MissingImageData(_))));
        assert_eq!(d.render("/img/"), "before<li>\n</li>\n");
    }

    #[test]
    fn test_valid_document_passes_check() {
        let d = doc(json!([{ "type": "upload", "value": { "filename": "p.jpg" } }]));
        assert_eq!(d.check(), Ok(()));
    }

    #[test]
    fn test_unknown_type_dumps_node() {
        let d = doc(json!([{ "type": "foo", "children": [{ "text": "kept" }] }]));
        let html = d.render("");
        assert!(html.starts_with("<strong>foo</strong>:<br/>"));
        assert!(html.contains(r#""type":"foo""#));
        assert!(html.contains("kept"));
    }

    #[test]
    fn test_leaf_without_string_payload_is_empty() {
        let d = doc(json!([{ "text": null, "bold": true }]));
        assert_eq!(d.render(""), "<strong></strong>");
    }

    #[test]
    fn test_non_array_document_is_empty() {
        assert!(doc(json!({ "text": "x" })).is_empty());
        assert_eq!(doc(json!(null)).render(""), "");
    }

    #[test]
    fn test_non_object_nodes_are_skipped() {
        let d = doc(json!([null, 3, { "text": "ok" }]));
        assert_eq!(d.render(""), "ok");
    }
}
