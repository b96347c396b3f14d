//! Markup tree model.
//!
//! A [`Markup`] is a parsed fragment: the input is run through html5ever's
//! fragment parser in a `body` context, so malformed scans recover exactly
//! like they would in a browser while leading whitespace and comments survive.
//! The fragment's `html` element is the root.
//! Every element is addressed by a [`NodeId`] that stays valid across edits.
//!
//! ```
//! use ketav::dom::Markup;
//!
//! let mut tree = Markup::parse("<h3>One</h3><p>text</p>");
//! let h3 = tree.find_all(|t, id| t.tag(id) == Some("h3"))[0];
//! let h1 = tree.create_element("h1");
//! tree.replace(h3, h1);
//! assert_eq!(tree.serialize(), "<h1>One</h1><p>text</p>");
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, Attribute, NodeData, NodeId};

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns, parse_fragment};

use crate::document::HeaderLevel;
use tree_sink::ArenaSink;

/// A parsed markup fragment.
pub struct Markup {
    dom: ArenaDom,
    root: NodeId,
}

impl Markup {
    /// Parse a markup fragment. Never fails.
    pub fn parse(markup: &str) -> Self {
        Self::parse_in(markup, html_name("body"))
    }

    /// Parse `markup` as the content of a `context` element, like an
    /// innerHTML assignment.
    fn parse_in(markup: &str, context: QualName) -> Self {
        let sink = ArenaSink::new();
        let result = parse_fragment(sink, ParseOpts::default(), context, Vec::new(), false)
            .from_utf8()
            .one(markup.as_bytes());
        let mut dom = result.into_dom();

        let doc = dom.document();
        let existing = dom.children(doc).find(|&id| dom.is_element(id));
        let root = match existing {
            Some(root) => root,
            None => {
                let root = dom.create_element(html_name("html"), Vec::new());
                dom.append(doc, root);
                root
            }
        };

        Self { dom, root }
    }

    /// The fragment root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// Serialize the fragment back to markup.
    pub fn serialize(&self) -> String {
        serialize::inner_html(&self.dom, self.root)
    }

    /// All elements below the root that satisfy `predicate`, in document order.
    ///
    /// The list is collected before returning, so callers may mutate the tree
    /// while walking it; ids of nodes that were detached meanwhile stay valid.
    pub fn find_all<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
    {
        self.dom
            .descendants(self.root)
            .into_iter()
            .filter(|&id| self.dom.is_element(id) && predicate(self, id))
            .collect()
    }

    /// Every element below the root, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.find_all(|_, _| true)
    }

    /// Every `h1`..`h6` element, in document order.
    pub fn headers(&self) -> Vec<NodeId> {
        self.find_all(|tree, id| tree.header_level(id).is_some())
    }

    /// Lowercase tag name, or `None` for non-elements.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.dom.element_name(id).map(|name| name.as_ref())
    }

    pub fn header_level(&self, id: NodeId) -> Option<HeaderLevel> {
        self.tag(id).and_then(HeaderLevel::from_tag)
    }

    /// Number of direct children that are elements.
    pub fn element_child_count(&self, id: NodeId) -> usize {
        self.dom
            .children(id)
            .filter(|&child| self.dom.is_element(child))
            .count()
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(own) = self.dom.text(id) {
            text.push_str(own);
        }
        for descendant in self.dom.descendants(id) {
            if let Some(chunk) = self.dom.text(descendant) {
                text.push_str(chunk);
            }
        }
        text
    }

    /// Serialized children of `id`.
    pub fn inner_markup(&self, id: NodeId) -> String {
        serialize::inner_html(&self.dom, id)
    }

    /// Serialized `id` including its own tags.
    pub fn outer_markup(&self, id: NodeId) -> String {
        serialize::outer_html(&self.dom, id)
    }

    /// Reparse `markup` and make it the new content of `id`.
    pub fn set_inner_markup(&mut self, id: NodeId, markup: &str) {
        let old: Vec<_> = self.dom.children(id).collect();
        for child in old {
            self.dom.detach(child);
        }
        let context = match self.dom.get(id).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => name.clone(),
            _ => html_name("body"),
        };
        let parsed = Markup::parse_in(markup, context);
        self.dom.import_children(&parsed.dom, parsed.root, id);
    }

    /// Create a detached element with no attributes.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom
            .create_element(html_name(&tag.to_ascii_lowercase()), Vec::new())
    }

    /// Put `new` where `old` is and move all of `old`'s children into it.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        self.dom.detach(new);
        self.dom.insert_before(old, new);
        self.dom.reparent_children(old, new);
        self.dom.detach(old);
    }

    /// Detach `id`, along with a directly following whitespace-only text node.
    pub fn remove(&mut self, id: NodeId) {
        let next = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        if self.dom.text(next).is_some_and(|t| t.trim().is_empty()) {
            self.dom.detach(next);
        }
        self.dom.detach(id);
    }
}

fn html_name(tag: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(tag))
}
