use std::collections::HashMap;

use indexmap::IndexMap;

/// A handle to a node owned by a [`Document`]. Handles are never reused, so a
/// handle to a freed node simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// A handle to an installed event listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Click,
    Change,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(String),

    /// A detached container whose children move into the parent it is
    /// appended to.
    Fragment,
}

struct Node {
    kind: NodeKind,
    text: String,
    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    disabled: bool,
    listeners: Vec<(Event, ListenerId)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A tree of elements rooted at `body`.
///
/// An element's own text renders before its children.
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            next_id: 0,
            body: NodeId(0),
        };
        doc.body = doc.create_element("body");
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                kind,
                text: String::new(),
                classes: Vec::new(),
                attributes: IndexMap::new(),
                disabled: false,
                listeners: Vec::new(),
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert(NodeKind::Element(tag.to_owned()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.insert(NodeKind::Fragment)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// How many nodes are alive, attached or not.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    /// The tag name, or `None` for fragments and freed nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Fragment => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.text.as_str())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = text.into();
        }
    }

    /// The text of the node and all its descendants, in document order.
    #[cfg(test)]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(node) = self.nodes.get(&id) {
            out.push_str(&node.text);
            for &child in &node.children {
                out.push_str(&self.text_content(child));
            }
        }
        out
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.nodes
            .get(&id)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the class list with the whitespace-separated names in `class`.
    pub fn set_class_name(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes = class.split_whitespace().map(str::to_owned).collect();
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if !node.classes.iter().any(|c| c == class) => {
                node.classes.push(class.to_owned());
                true
            }
            _ => false,
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        node.classes.len() != before
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(&id)?.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.attributes.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attributes.insert(name.to_owned(), value.into());
        }
    }

    /// Reads the `data-{key}` attribute.
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attribute(id, &format!("data-{key}"))
    }

    pub fn set_data(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        self.set_attribute(id, &format!("data-{key}"), value);
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.disabled)
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.disabled = disabled;
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        while let Some(parent) = self.parent(id) {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    ///
    /// Appending a fragment moves its children instead and frees the
    /// fragment. Returns `false` when either node is gone or the append would
    /// create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child
            || !self.contains(parent)
            || !self.contains(child)
            || self.is_ancestor(child, parent)
        {
            return false;
        }

        if self.kind(child) == Some(&NodeKind::Fragment) {
            let moved = self
                .nodes
                .get_mut(&child)
                .map(|n| std::mem::take(&mut n.children))
                .unwrap_or_default();
            for &id in &moved {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.parent = Some(parent);
                }
            }
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.extend(moved);
            }
            self.detach(child);
            self.nodes.remove(&child);
            return true;
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        true
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != id);
        }
    }

    /// Detaches `id` and frees it along with its whole subtree, including
    /// any listeners installed on it.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);
        self.free(id);
        true
    }

    fn free(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.free(child);
            }
        }
    }

    /// Removes and frees every child of `parent`, last child first.
    pub fn delete_child_elements(&mut self, parent: NodeId) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        while let Some(&child) = self.children(parent).last() {
            self.remove(child);
        }
        Some(parent)
    }

    /// Every node below `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// Installs `listener` for `event`. Installing the same listener twice is
    /// a no-op and returns `false`.
    pub fn add_event_listener(&mut self, id: NodeId, event: Event, listener: ListenerId) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if !node.listeners.contains(&(event, listener)) => {
                node.listeners.push((event, listener));
                true
            }
            _ => false,
        }
    }

    /// Removes exactly `listener`. Returns `false` if it was not installed.
    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        event: Event,
        listener: ListenerId,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|&l| l != (event, listener));
        node.listeners.len() != before
    }

    /// The listeners a dispatch of `event` on `id` would call, in install
    /// order.
    pub fn listeners(&self, id: NodeId, event: Event) -> Vec<ListenerId> {
        self.nodes
            .get(&id)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(e, _)| *e == event)
                    .map(|&(_, l)| l)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Matches elements by tag and, optionally, one `data-*` attribute value.
#[derive(Clone, Copy, Debug)]
pub struct Selector<'a> {
    tag: &'a str,
    data: Option<(&'a str, &'a str)>,
}

impl<'a> Selector<'a> {
    pub fn tag(tag: &'a str) -> Self {
        Self { tag, data: None }
    }

    pub fn with_data(self, key: &'a str, value: &'a str) -> Self {
        Self {
            data: Some((key, value)),
            ..self
        }
    }

    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        if doc.tag(id) != Some(self.tag) {
            return false;
        }
        match self.data {
            Some((key, value)) => doc.data(id, key) == Some(value),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with_text(doc: &mut Document, tag: &str, text: &str) -> NodeId {
        let id = doc.create_element(tag);
        doc.set_text(id, text);
        id
    }

    #[test]
    fn fragment_children_move_into_parent() {
        let mut doc = Document::new();
        let body = doc.body();
        let fragment = doc.create_fragment();
        let a = element_with_text(&mut doc, "p", "a");
        let b = element_with_text(&mut doc, "p", "b");
        doc.append_child(fragment, a);
        doc.append_child(fragment, b);

        assert!(doc.append_child(body, fragment));
        assert_eq!(doc.children(body), &[a, b]);
        assert_eq!(doc.parent(a), Some(body));
        assert!(!doc.contains(fragment));
    }

    #[test]
    fn append_moves_between_parents_and_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        let leaf = doc.create_element("p");
        doc.append_child(outer, inner);
        doc.append_child(inner, leaf);

        assert!(!doc.append_child(leaf, outer));
        assert!(doc.append_child(outer, leaf));
        assert_eq!(doc.children(outer), &[inner, leaf]);
        assert!(doc.children(inner).is_empty());
    }

    #[test]
    fn delete_child_elements_frees_subtrees() {
        let mut doc = Document::new();
        let main = doc.create_element("main");
        let article = doc.create_element("article");
        let button = doc.create_element("button");
        doc.append_child(main, article);
        doc.append_child(article, button);
        doc.add_event_listener(button, Event::Click, ListenerId(1));
        let alive = doc.len();

        assert_eq!(doc.delete_child_elements(main), Some(main));
        assert!(doc.children(main).is_empty());
        assert!(!doc.contains(button));
        assert!(doc.listeners(button, Event::Click).is_empty());
        assert_eq!(doc.len(), alive - 2);
    }

    #[test]
    fn selector_matches_tag_and_data() {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc.create_element("section");
        let button = doc.create_element("button");
        doc.set_data(section, "post-id", "4");
        doc.set_data(button, "post-id", "4");
        doc.append_child(body, section);
        doc.append_child(body, button);

        let found = doc.query_selector(body, &Selector::tag("section").with_data("post-id", "4"));
        assert_eq!(found, Some(section));
        assert_eq!(doc.query_selector(body, &Selector::tag("section").with_data("post-id", "5")), None);
        assert_eq!(doc.query_selector_all(body, &Selector::tag("button")), vec![button]);
    }

    #[test]
    fn listeners_are_removed_by_identity() {
        let mut doc = Document::new();
        let button = doc.create_element("button");

        assert!(doc.add_event_listener(button, Event::Click, ListenerId(1)));
        assert!(!doc.add_event_listener(button, Event::Click, ListenerId(1)));
        assert!(!doc.remove_event_listener(button, Event::Click, ListenerId(2)));
        assert_eq!(doc.listeners(button, Event::Click), vec![ListenerId(1)]);
        assert!(doc.remove_event_listener(button, Event::Click, ListenerId(1)));
        assert!(doc.listeners(button, Event::Click).is_empty());
    }

    #[test]
    fn text_content_walks_descendants() {
        let mut doc = Document::new();
        let article = doc.create_element("article");
        let h3 = element_with_text(&mut doc, "h3", "Name");
        let p = element_with_text(&mut doc, "p", " body");
        doc.append_child(article, h3);
        doc.append_child(article, p);

        assert_eq!(doc.text_content(article), "Name body");
    }
}
