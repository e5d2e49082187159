use crate::node::{NodeData, NodeKey, Rect};
use crate::path::{PathTarget, resolve};
use tools::{Value, as_string};

/// Viewport dimensions in px, supplied by the embedder.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Arena-backed document tree.
///
/// Slot 0 is the body node every session ultimately hangs off. Handles are
/// never recycled: detaching a node unlinks it from its parent but keeps
/// its slot, so stale handles stay safe to query.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    viewport: Viewport,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            viewport,
        };
        doc.nodes.push(NodeData::with_tag("body".to_string()));
        doc
    }

    /// The body node; the default base frame for building sessions.
    pub fn root(&self) -> NodeKey {
        NodeKey(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        (key.0 as usize) < self.nodes.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Creates a detached element. Returns `None` when the tag name is not
    /// a plausible element name (empty, or not letter-led alphanumeric).
    pub fn create_element(&mut self, tag: &str) -> Option<NodeKey> {
        if !valid_tag(tag) {
            return None;
        }
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(NodeData::with_tag(tag.to_ascii_lowercase()));
        Some(key)
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first (re-appending an existing child moves it to the
    /// end). Refuses the body node and hierarchy cycles; returns whether the
    /// append happened.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> bool {
        if child == self.root() || child == parent || self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.data_mut(parent).children.push(child);
        self.data_mut(child).parent = Some(parent);
        true
    }

    /// Unlinks a node from its parent. The body node cannot be detached.
    pub fn detach(&mut self, key: NodeKey) {
        let Some(parent) = self.data(key).parent else {
            return;
        };
        self.data_mut(parent).children.retain(|c| *c != key);
        self.data_mut(key).parent = None;
    }

    /// Whether the node is linked into the tree under the body node.
    pub fn is_attached(&self, key: NodeKey) -> bool {
        if !self.contains(key) {
            return false;
        }
        let mut current = key;
        loop {
            if current == self.root() {
                return true;
            }
            match self.data(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether the node is attached AND rendered: neither it nor any
    /// ancestor carries `display: none`.
    pub fn is_live(&self, key: NodeKey) -> bool {
        if !self.is_attached(key) {
            return false;
        }
        let mut current = key;
        loop {
            if self.style(current, "display") == Some("none") {
                return false;
            }
            if current == self.root() {
                return true;
            }
            match self.data(current).parent {
                Some(parent) => current = parent,
                // Unreachable after the is_attached check.
                None => return false,
            }
        }
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.data(key).parent
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        &self.data(key).children
    }

    pub fn child_count(&self, key: NodeKey) -> usize {
        self.data(key).children.len()
    }

    pub fn tag(&self, key: NodeKey) -> &str {
        &self.data(key).tag
    }

    pub fn id(&self, key: NodeKey) -> &str {
        &self.data(key).id
    }

    pub fn set_id(&mut self, key: NodeKey, id: &str) {
        self.data_mut(key).id = id.to_string();
    }

    pub fn text(&self, key: NodeKey) -> &str {
        &self.data(key).text
    }

    pub fn set_text(&mut self, key: NodeKey, text: &str) {
        self.data_mut(key).text = text.to_string();
    }

    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        lookup(&self.data(key).attributes, name)
    }

    pub fn set_attribute(&mut self, key: NodeKey, name: &str, value: &str) {
        upsert(&mut self.data_mut(key).attributes, name, value);
    }

    pub fn classes(&self, key: NodeKey) -> &[String] {
        &self.data(key).classes
    }

    pub fn has_class(&self, key: NodeKey, name: &str) -> bool {
        self.data(key).classes.iter().any(|c| c == name)
    }

    /// Adds a class token; duplicates are ignored.
    pub fn add_class(&mut self, key: NodeKey, name: &str) {
        if name.is_empty() || self.has_class(key, name) {
            return;
        }
        self.data_mut(key).classes.push(name.to_string());
    }

    pub fn style(&self, key: NodeKey, name: &str) -> Option<&str> {
        lookup(&self.data(key).style, name)
    }

    pub fn set_style(&mut self, key: NodeKey, name: &str, value: &str) {
        upsert(&mut self.data_mut(key).style, name, value);
    }

    pub fn bounding_rect(&self, key: NodeKey) -> Rect {
        self.data(key).rect
    }

    /// Records the node's layout rectangle, as computed by the embedder.
    pub fn set_layout_rect(&mut self, key: NodeKey, rect: Rect) {
        self.data_mut(key).rect = rect;
    }

    /// Sets a property through a dotted path. Undotted names land on the
    /// node itself (`text` and `id` are recognized fields, anything else
    /// goes into the generic property bag); `style.<name>` writes the style
    /// map; a path through a missing intermediate is silently ignored.
    pub fn set_path_property(&mut self, key: NodeKey, path: &str, value: Value) {
        match resolve(path) {
            PathTarget::Plain(name) => self.set_plain_property(key, name, value),
            PathTarget::Style(name) => {
                let value = as_string(&value, "");
                self.set_style(key, name, &value);
            }
            PathTarget::NoOp => {}
        }
    }

    pub fn get_plain_property(&self, key: NodeKey, name: &str) -> Value {
        match name {
            "text" => Value::Str(self.data(key).text.clone()),
            "id" => Value::Str(self.data(key).id.clone()),
            _ => self
                .data(key)
                .props
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null),
        }
    }

    fn set_plain_property(&mut self, key: NodeKey, name: &str, value: Value) {
        match name {
            "text" => self.data_mut(key).text = as_string(&value, ""),
            "id" => self.data_mut(key).id = as_string(&value, ""),
            _ => {
                let props = &mut self.data_mut(key).props;
                match props.iter_mut().find(|(n, _)| n == name) {
                    Some((_, slot)) => *slot = value,
                    None => props.push((name.to_string(), value)),
                }
            }
        }
    }

    fn is_ancestor(&self, candidate: NodeKey, of: NodeKey) -> bool {
        let mut current = self.data(of).parent;
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.data(node).parent;
        }
        false
    }

    fn data(&self, key: NodeKey) -> &NodeData {
        &self.nodes[key.0 as usize]
    }

    fn data_mut(&mut self, key: NodeKey) -> &mut NodeData {
        &mut self.nodes[key.0 as usize]
    }
}

fn valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn lookup<'a>(entries: &'a [(String, String)], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn upsert(entries: &mut Vec<(String, String)>, name: &str, value: &str) {
    match entries.iter_mut().find(|(n, _)| n == name) {
        Some((_, slot)) => *slot = value.to_string(),
        None => entries.push((name.to_string(), value.to_string())),
    }
}
