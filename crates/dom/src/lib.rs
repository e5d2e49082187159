//! # dom
//!
//! The host tree: an arena-backed document of element nodes. Nodes are
//! addressed by opaque [`NodeKey`] handles; a detached node keeps its slot
//! (and its handle stays valid) so callers can re-append or inspect it
//! after removal, mirroring how a retained UI tree behaves.
//!
//! The crate also carries the geometry surface the widget layer needs:
//! per-node layout rectangles (assigned by whatever drives layout) and the
//! viewport dimensions, plus the two liveness queries:
//!
//! - [`Document::is_attached`]: the node is linked into the tree.
//! - [`Document::is_live`]: attached AND rendered, with no `display: none` on
//!   the node or any ancestor.

mod document;
mod node;
mod path;

pub use document::{Document, Viewport};
pub use node::{NodeKey, Rect};
