use tools::Value;

pub type RawKey = u32;

/// Opaque handle to a node in a [`Document`](crate::Document) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(pub RawKey);

/// A rectangle in px units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Default)]
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) id: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) style: Vec<(String, String)>,
    pub(crate) text: String,
    pub(crate) props: Vec<(String, Value)>,
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
}

impl NodeData {
    pub(crate) fn with_tag(tag: String) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }
}
