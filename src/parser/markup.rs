//! Markup tree access on top of html5ever's reference-counted DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};

/// A parsed HTML document.
pub struct Markup {
    dom: RcDom,
}

impl Markup {
    /// Parse an HTML string.
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_bytes(html.as_bytes())
    }

    /// Parse HTML from bytes (invalid UTF-8 is replaced lossily).
    pub fn parse_bytes(mut data: &[u8]) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut data)
            .map_err(|e| Error::HtmlParse(e.to_string()))?;
        Ok(Self { dom })
    }

    /// Document node.
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// First element with the given tag, in document order.
    pub fn find_first(&self, tag: &str) -> Option<Handle> {
        find_descendant(self.root(), &|h: &Handle| tag_of(h) == Some(tag))
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Handle> {
        find_descendant(self.root(), &|h: &Handle| attr(h, "id").as_deref() == Some(id))
    }
}

/// Tag name of an element node.
pub fn tag_of(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Attribute value by name.
pub fn attr(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Element children, skipping text and comment nodes.
pub fn element_children(handle: &Handle) -> Vec<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .filter(|c| matches!(c.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Element children with the given tag.
pub fn children_by_tag(handle: &Handle, tag: &str) -> Vec<Handle> {
    element_children(handle)
        .into_iter()
        .filter(|c| tag_of(c) == Some(tag))
        .collect()
}

/// Check if a node has at least one element child.
pub fn has_element_children(handle: &Handle) -> bool {
    handle
        .children
        .borrow()
        .iter()
        .any(|c| matches!(c.data, NodeData::Element { .. }))
}

/// Parent node, if still alive.
pub fn parent(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take()?;
    let parent = weak.upgrade();
    handle.parent.set(Some(weak));
    parent
}

/// Take the first node, step into its element children, and repeat `levels` times.
///
/// Returns an empty list if the chain breaks before the last level.
pub fn children_of_first(nodes: &[Handle], levels: usize) -> Vec<Handle> {
    let mut current = nodes.to_vec();
    for _ in 0..levels {
        match current.first() {
            Some(first) => current = element_children(first),
            None => return Vec::new(),
        }
    }
    current
}

/// All descendant text, concatenated in document order.
pub fn text_content(handle: &Handle) -> String {
    text_content_excluding(handle, &[])
}

/// Descendant text, skipping the subtrees of elements whose tag is in `skip`.
pub fn text_content_excluding(handle: &Handle, skip: &[&str]) -> String {
    let mut text = String::new();
    collect_text(handle, skip, &mut text);
    text
}

fn collect_text(handle: &Handle, skip: &[&str], out: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } => {
                if !skip.contains(&name.local.as_ref()) {
                    collect_text(child, skip, out);
                }
            }
            _ => {}
        }
    }
}

fn find_descendant(handle: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) && pred(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, pred) {
            return Some(found);
        }
    }
    None
}
