//! Allow-list HTML sanitizer for untrusted feed content.
//!
//! Feed entries embed arbitrary HTML. Before anything reaches the rendered
//! page it passes through [`Sanitizer::clean`], which re-serializes the
//! fragment keeping only allow-listed tags and attributes. Disallowed tags
//! are dropped but their text content is retained, so a stray `<font>` or
//! `<script>` wrapper never deletes the article text around it.
//!
//! Parsing is best-effort: malformed input degrades gracefully and never
//! produces an error.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;
use std::collections::{HashMap, HashSet};

/// Tags allowed through sanitization.
const ALLOWED_TAGS: &[&str] = &[
    "p", "b", "i", "em", "strong", "a", "ul", "ol", "li", "br", "img", "h1", "h2", "h3", "h4",
    "h5", "h6", "blockquote", "pre", "code", "span", "div",
];

/// Attributes allowed on any tag.
const GLOBAL_ATTRS: &[&str] = &["class", "style"];

/// Per-tag attribute allowances beyond the global set.
const TAG_ATTRS: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("img", &["src", "alt", "width", "height"]),
];

/// Attributes whose value is a URL and must pass the scheme check.
const URL_ATTRS: &[&str] = &["href", "src"];

/// Schemes permitted in URL-valued attributes. Relative URLs are always
/// allowed; `javascript:`, `data:` and friends are dropped.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Void elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "img"];

/// Allow-list HTML sanitizer.
///
/// The allow-lists are fixed at construction; a single instance is shared
/// for the whole run.
pub struct Sanitizer {
    allowed_tags: HashSet<&'static str>,
    tag_attrs: HashMap<&'static str, &'static [&'static str]>,
    void_tags: HashSet<&'static str>,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            allowed_tags: ALLOWED_TAGS.iter().copied().collect(),
            tag_attrs: TAG_ATTRS.iter().copied().collect(),
            void_tags: VOID_TAGS.iter().copied().collect(),
        }
    }

    /// Sanitize an HTML fragment, returning markup that contains only
    /// allow-listed tags and attributes.
    pub fn clean(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut out = String::new();
        self.write_node(fragment.tree.root(), &mut out);
        out
    }

    fn write_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => {
                out.push_str(&html_escape::encode_text(&*text.text));
            }
            Node::Element(el) => {
                let name = el.name();
                if self.allowed_tags.contains(name) {
                    out.push('<');
                    out.push_str(name);
                    for (attr, value) in el.attrs() {
                        if self.attr_allowed(name, attr, value) {
                            out.push(' ');
                            out.push_str(attr);
                            out.push_str("=\"");
                            out.push_str(&html_escape::encode_double_quoted_attribute(value));
                            out.push('"');
                        }
                    }
                    out.push('>');
                    if !self.void_tags.contains(name) {
                        for child in node.children() {
                            self.write_node(child, out);
                        }
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                } else {
                    // Tag is stripped; its content survives.
                    for child in node.children() {
                        self.write_node(child, out);
                    }
                }
            }
            // html5ever wraps fragments in a synthetic document/element pair
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.write_node(child, out);
                }
            }
            // Comments, doctypes, processing instructions are dropped.
            _ => {}
        }
    }

    fn attr_allowed(&self, tag: &str, attr: &str, value: &str) -> bool {
        let listed = GLOBAL_ATTRS.contains(&attr)
            || self
                .tag_attrs
                .get(tag)
                .is_some_and(|attrs| attrs.contains(&attr));
        if !listed {
            return false;
        }
        if URL_ATTRS.contains(&attr) {
            return scheme_allowed(value);
        }
        true
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept relative URLs and absolute URLs with a safe scheme.
fn scheme_allowed(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => ALLOWED_SCHEMES.contains(&parsed.scheme()),
        // Not absolute: relative reference, allowed.
        Err(_) => true,
    }
}

/// Strip all markup from an HTML fragment, returning its text content.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}

/// Trim surrounding whitespace and cap the text at `max_chars` characters,
/// appending `...` when something was cut off.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
