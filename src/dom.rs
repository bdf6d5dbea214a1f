//! In-process element tree standing in for the browser page.
//!
//! Elements live in an arena and are addressed by [`NodeId`]. Removing an
//! element detaches it (and its subtree) permanently; its id stays invalid
//! afterwards. Slots of removed elements are reused by later elements, so the
//! arena is bounded by the most elements alive at once. Appending an element
//! that already has a parent moves it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::{BoardError, Result};
use crate::order::FormFields;

/// Handle to an element in a [`Document`].
///
/// The generation tells a reused slot apart from the element that held it
/// before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    generation: u32,
    text: String,
    /// Current value of a form control; not part of the markup
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
}

impl Element {
    fn new(tag: &str, generation: u32) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            generation,
            text: String::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            removed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    /// Slots of removed elements, ready for reuse
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", 0)],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        if let Some(index) = self.free.pop() {
            let generation = self.nodes[index].generation.wrapping_add(1);
            self.nodes[index] = Element::new(tag, generation);
            return NodeId { index, generation };
        }

        self.nodes.push(Element::new(tag, 0));
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    fn get(&self, id: NodeId) -> Result<&Element> {
        match self.nodes.get(id.index) {
            Some(el) if !el.removed && el.generation == id.generation => Ok(el),
            _ => Err(BoardError::NodeNotFound(id.index)),
        }
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match self.nodes.get_mut(id.index) {
            Some(el) if !el.removed && el.generation == id.generation => Ok(el),
            _ => Err(BoardError::NodeNotFound(id.index)),
        }
    }

    /// Whether the element exists and is reachable from the root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            let Ok(el) = self.get(node) else {
                return false;
            };
            if node == self.root {
                return true;
            }
            current = el.parent;
        }
        false
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).ok().map(|el| el.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)
            .ok()
            .and_then(|el| el.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.get_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.get_mut(id)?.attrs.remove(name);
        Ok(())
    }

    /// Read a `data-*` attribute, e.g. `data(id, "area")` for `data-area`
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &format!("data-{key}"))
    }

    pub fn set_data(&mut self, id: NodeId, key: &str, value: &str) -> Result<()> {
        self.set_attr(id, &format!("data-{key}"), value)
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)
            .ok()
            .and_then(|el| el.styles.get(property))
            .map(String::as_str)
    }

    /// Set an inline style property; an empty value removes it
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        let el = self.get_mut(id)?;
        if value.is_empty() {
            el.styles.remove(property);
        } else {
            el.styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Set the element's own text (rendered before its children)
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        self.get_mut(id)?.text = text.to_string();
        Ok(())
    }

    /// Concatenated text of the element and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Ok(el) = self.get(id) {
            out.push_str(&el.text);
            for &child in &el.children {
                self.collect_text(child, out);
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).ok().and_then(|el| el.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.bubble_path(node).contains(&ancestor)
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;
        if self.contains(child, parent) {
            return Err(BoardError::HierarchyRequest(child.index));
        }

        self.detach(child);
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Ok(el) = self.get_mut(parent) {
                el.children.retain(|&c| c != id);
            }
            if let Ok(el) = self.get_mut(id) {
                el.parent = None;
            }
        }
    }

    /// Detach and discard the element together with its subtree
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.get(id)?;
        if id == self.root {
            return Err(BoardError::HierarchyRequest(id.index));
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let el = &mut self.nodes[node.index];
            el.removed = true;
            stack.extend(el.children.drain(..));
            self.free.push(node.index);
        }
        Ok(())
    }

    /// The element followed by each of its ancestors, innermost first.
    ///
    /// This is the path a bubbling event travels.
    pub fn bubble_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(id).ok().map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// Nearest element on the bubble path matching `predicate`
    pub fn closest<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.bubble_path(id)
            .into_iter()
            .find(|&node| predicate(self, node))
    }

    pub fn closest_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.closest(id, |doc, node| doc.tag(node) == Some(tag))
    }

    pub fn closest_with_data(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.closest(id, |doc, node| doc.data(node, key).is_some())
    }

    /// Connected elements in document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// First connected element whose `data-{key}` equals `value`
    pub fn query_data(&self, key: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.data(node, key) == Some(value))
    }

    /// Every connected element carrying a `data-{key}` attribute
    pub fn query_data_all(&self, key: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&node| self.data(node, key).is_some())
            .collect()
    }

    /// Current value of a form control
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id).ok().map(|el| el.value.as_str())
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        self.get_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn is_field(&self, id: NodeId) -> bool {
        matches!(self.tag(id), Some("input") | Some("select"))
            && self.has_attr(id, "name")
    }

    /// Named field values inside a form
    pub fn form_data(&self, form: NodeId) -> FormFields {
        let mut fields = FormFields::new();
        for node in self.descendants(form) {
            if self.is_field(node)
                && let Some(name) = self.attr(node, "name")
            {
                fields.insert(name, self.value(node).unwrap_or_default());
            }
        }
        fields
    }

    /// Restore every field in the form to its initial value: empty for
    /// inputs, the first option for selects
    pub fn reset_form(&mut self, form: NodeId) -> Result<()> {
        self.get(form)?;
        for node in self.descendants(form) {
            if !self.is_field(node) {
                continue;
            }
            let initial = if self.tag(node) == Some("select") {
                self.children(node)
                    .first()
                    .and_then(|&opt| self.attr(opt, "value"))
                    .unwrap_or_default()
                    .to_string()
            } else {
                String::new()
            };
            self.set_value(node, &initial)?;
        }
        Ok(())
    }

    /// Serialize an element and its subtree as HTML
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(el) = self.get(id) else {
            return;
        };

        out.push('<');
        out.push_str(&el.tag);
        for (name, value) in &el.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        if !el.styles.is_empty() {
            let style: Vec<String> = el
                .styles
                .iter()
                .map(|(prop, value)| format!("{prop}: {value};"))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&style.join(" ")));
        }
        out.push('>');

        if is_void(&el.tag) {
            return;
        }

        out.push_str(&escape(&el.text));
        for &child in &el.children {
            self.write_html(child, out);
        }
        let _ = write!(out, "</{}>", el.tag);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.create_element("section");
        doc.set_data(section, "area", "ordered").unwrap();
        let card = doc.create_element("div");
        doc.set_data(card, "id", "abc").unwrap();
        let title = doc.create_element("div");
        doc.set_text(title, "Table 4").unwrap();
        doc.append_child(doc.root(), section).unwrap();
        doc.append_child(section, card).unwrap();
        doc.append_child(card, title).unwrap();
        (doc, section, card, title)
    }

    #[test]
    fn test_bubble_path_innermost_first() {
        let (doc, section, card, title) = tree();
        assert_eq!(doc.bubble_path(title), vec![title, card, section, doc.root()]);
    }

    #[test]
    fn test_closest_with_data() {
        let (doc, section, card, title) = tree();
        assert_eq!(doc.closest_with_data(title, "id"), Some(card));
        assert_eq!(doc.closest_with_data(title, "area"), Some(section));
        assert_eq!(doc.closest_with_data(section, "id"), None);
        assert_eq!(doc.closest_tag(title, "section"), Some(section));
    }

    #[test]
    fn test_append_moves_element() {
        let (mut doc, section, card, _) = tree();
        let other = doc.create_element("section");
        doc.append_child(doc.root(), other).unwrap();

        doc.append_child(other, card).unwrap();
        assert!(doc.children(section).is_empty());
        assert_eq!(doc.children(other), &[card]);
        assert_eq!(doc.parent(card), Some(other));
    }

    #[test]
    fn test_append_into_own_subtree_rejected() {
        let (mut doc, _, card, title) = tree();
        let err = doc.append_child(title, card).unwrap_err();
        assert!(matches!(err, BoardError::HierarchyRequest(_)));
    }

    #[test]
    fn test_remove_invalidates_subtree() {
        let (mut doc, section, card, title) = tree();
        doc.remove(card).unwrap();
        assert!(doc.children(section).is_empty());
        assert!(!doc.is_connected(card));
        assert!(!doc.is_connected(title));
        assert!(matches!(doc.remove(card), Err(BoardError::NodeNotFound(_))));
        assert_eq!(doc.query_data("id", "abc"), None);
    }

    #[test]
    fn test_removed_slot_reused_with_fresh_id() {
        let mut doc = Document::new();
        let card = doc.create_element("div");
        let title = doc.create_element("span");
        doc.append_child(doc.root(), card).unwrap();
        doc.append_child(card, title).unwrap();
        doc.remove(card).unwrap();

        let first = doc.create_element("p");
        let second = doc.create_element("p");
        let mut reused = vec![first.index(), second.index()];
        reused.sort();
        let mut freed = vec![card.index(), title.index()];
        freed.sort();
        assert_eq!(reused, freed);

        assert_eq!(doc.tag(card), None);
        assert_eq!(doc.tag(title), None);
        assert_ne!(first, card);
        assert_ne!(second, card);
        assert_eq!(doc.tag(first), Some("p"));
        assert!(doc.set_attr(card, "class", "stale").is_err());
    }

    #[test]
    fn test_detached_element_not_connected() {
        let mut doc = Document::new();
        let loose = doc.create_element("div");
        assert!(!doc.is_connected(loose));
        assert!(doc.is_connected(doc.root()));
    }

    #[test]
    fn test_query_data_document_order() {
        let (mut doc, section, _, _) = tree();
        let second = doc.create_element("div");
        doc.set_data(second, "id", "def").unwrap();
        doc.append_child(section, second).unwrap();

        assert_eq!(doc.query_data("id", "def"), Some(second));
        assert_eq!(doc.query_data_all("id").len(), 2);
    }

    #[test]
    fn test_text_content() {
        let (doc, section, _, _) = tree();
        assert_eq!(doc.text_content(section), "Table 4");
    }

    #[test]
    fn test_form_data_and_reset() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let input = doc.create_element("input");
        doc.set_attr(input, "name", "title").unwrap();
        let select = doc.create_element("select");
        doc.set_attr(select, "name", "table").unwrap();
        for value in ["1", "2"] {
            let option = doc.create_element("option");
            doc.set_attr(option, "value", value).unwrap();
            doc.append_child(select, option).unwrap();
        }
        doc.append_child(form, input).unwrap();
        doc.append_child(form, select).unwrap();

        doc.set_value(input, "Table 4").unwrap();
        doc.set_value(select, "2").unwrap();
        let fields = doc.form_data(form);
        assert_eq!(fields.get("title"), Some("Table 4"));
        assert_eq!(fields.get("table"), Some("2"));

        doc.reset_form(form).unwrap();
        let fields = doc.form_data(form);
        assert_eq!(fields.get("title"), Some(""));
        assert_eq!(fields.get("table"), Some("1"));
    }

    #[test]
    fn test_to_html_escapes() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attr(div, "class", "order").unwrap();
        doc.set_attr(div, "title", "\"quoted\"").unwrap();
        doc.set_text(div, "Fish & <Chips>").unwrap();
        doc.set_style(div, "background-color", "red").unwrap();
        assert_eq!(
            doc.to_html(div),
            concat!(
                r#"<div class="order" title="&quot;quoted&quot;" style="background-color: red;">"#,
                "Fish &amp; &lt;Chips&gt;</div>"
            )
        );

        doc.set_style(div, "background-color", "").unwrap();
        assert_eq!(doc.style(div, "background-color"), None);
    }

    #[test]
    fn test_value_not_serialized() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_value(input, "Table 4").unwrap();
        assert_eq!(doc.value(input), Some("Table 4"));
        assert_eq!(doc.to_html(input), "<input>");
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attr(input, "required", "").unwrap();
        doc.set_attr(input, "name", "title").unwrap();
        assert_eq!(doc.to_html(input), "<input name=\"title\" required>");
    }
}
