use crate::error::{BuilderError, BuilderResult};
use crate::stack::BuilderStack;
use dom::{Document, NodeKey};
use tools::{Value, as_string};

/// What [`TreeBuilder::start_push`] actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartPush {
    /// No session was open; one was started with the node as base frame.
    Started(NodeKey),
    /// A session was open; the node was adopted and pushed.
    Pushed,
}

/// What [`TreeBuilder::end_pop`] actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndPop {
    /// Only the base frame remained; the session was ended.
    Ended,
    /// One frame was popped, the session stays open.
    Popped,
}

/// One bracketed tree-construction session.
///
/// At most one session is open per builder; `start` while active raises
/// [`BuilderError::AlreadyActive`], and every active-only operation raises
/// [`BuilderError::NotActive`] outside a session. The document is passed
/// into each call rather than borrowed for the session's lifetime, so a
/// single document can serve several builders and the surrounding code.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: BuilderStack,
    active: bool,
    base: Option<NodeKey>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current nesting depth, including the base frame.
    pub fn depth(&self) -> usize {
        self.stack.count()
    }

    /// The node attribute/property setters currently address.
    pub fn top(&self) -> Option<NodeKey> {
        self.stack.top()
    }

    /// Opens a session. A hint that is not a valid handle resolves to the
    /// document body. Returns the resolved base frame.
    pub fn start(&mut self, doc: &Document, hint: Option<NodeKey>) -> BuilderResult<NodeKey> {
        if self.active {
            return Err(BuilderError::AlreadyActive);
        }

        self.stack.clear();
        let base = match hint {
            Some(key) if doc.contains(key) => key,
            _ => doc.root(),
        };
        self.stack.push(base);
        self.active = true;
        self.base = Some(base);
        log::trace!(target: "builder.session", "session started at {base:?}");
        Ok(base)
    }

    /// Closes the session. Pops the base frame when it is still on top,
    /// then fails with the exact leftover count if anything else remains.
    pub fn end(&mut self) -> BuilderResult<()> {
        if !self.active {
            return Err(BuilderError::NotActive);
        }

        if self.stack.top() == self.base {
            self.stack.pop(1);
        }

        let leftover = self.stack.count();
        if leftover > 0 {
            return Err(BuilderError::UnbalancedSession { leftover });
        }

        self.active = false;
        self.base = None;
        log::trace!(target: "builder.session", "session ended");
        Ok(())
    }

    /// Adopts an already-constructed node: appends it under the current top
    /// and pushes it as the new top.
    pub fn push(&mut self, doc: &mut Document, node: NodeKey) -> BuilderResult<()> {
        let parent = self.current()?;
        doc.append_child(parent, node);
        self.stack.push(node);
        Ok(())
    }

    /// Removes exactly one frame.
    pub fn pop(&mut self) -> BuilderResult<()> {
        if !self.active {
            return Err(BuilderError::NotActive);
        }
        self.stack.pop(1);
        Ok(())
    }

    /// Creates a node of the given tag, appends it under the current top,
    /// pushes it, and returns it.
    pub fn start_element(&mut self, doc: &mut Document, tag: &str) -> BuilderResult<NodeKey> {
        self.current()?;
        let node = doc
            .create_element(tag)
            .ok_or_else(|| BuilderError::ElementCreationFailed {
                tag: tag.to_string(),
            })?;
        self.push(doc, node)?;
        log::trace!(target: "builder.session", "opened <{tag}> as {node:?}");
        Ok(node)
    }

    /// Closes the element opened by the matching [`Self::start_element`].
    pub fn end_element(&mut self) -> BuilderResult<()> {
        self.pop()
    }

    /// Dispatches to `start` when no session is open and to `push`
    /// otherwise, reporting which happened so the caller knows whether it
    /// owes an `end` or a `pop`.
    pub fn start_push(&mut self, doc: &mut Document, node: NodeKey) -> BuilderResult<StartPush> {
        if self.active {
            self.push(doc, node)?;
            Ok(StartPush::Pushed)
        } else {
            let base = self.start(doc, Some(node))?;
            Ok(StartPush::Started(base))
        }
    }

    /// Dispatches to `end` when only the base frame remains and to `pop`
    /// otherwise.
    pub fn end_pop(&mut self) -> BuilderResult<EndPop> {
        if self.stack.count() == 1 {
            self.end()?;
            Ok(EndPop::Ended)
        } else {
            self.pop()?;
            Ok(EndPop::Popped)
        }
    }

    /// Makes sure `node` is the current top, via [`Self::start_push`] when
    /// it is not. Returns whether a push happened; when it did, the caller
    /// owes a balancing [`Self::end_pop`].
    pub fn ensure_top(&mut self, doc: &mut Document, node: NodeKey) -> BuilderResult<bool> {
        if self.active && self.stack.top() == Some(node) {
            return Ok(false);
        }
        self.start_push(doc, node)?;
        Ok(true)
    }

    /// Sets a string attribute on the current top; name and value are both
    /// coerced to strings.
    pub fn set_attribute(
        &mut self,
        doc: &mut Document,
        name: impl Into<Value>,
        value: impl Into<Value>,
    ) -> BuilderResult<()> {
        let top = self.current()?;
        let name = as_string(&name.into(), "");
        let value = as_string(&value.into(), "");
        doc.set_attribute(top, &name, &value);
        Ok(())
    }

    /// Applies each entry of an attribute map independently, in insertion
    /// order; earlier entries stay applied if a later one fails.
    pub fn set_attributes(&mut self, doc: &mut Document, attributes: &Value) -> BuilderResult<()> {
        let Some(pairs) = attributes.as_map() else {
            return Err(BuilderError::InvalidInput {
                expected: "a map of attributes",
            });
        };
        for (name, value) in pairs {
            self.set_attribute(doc, name.as_str(), value.clone())?;
        }
        Ok(())
    }

    pub fn get_attribute(
        &self,
        doc: &Document,
        name: impl Into<Value>,
    ) -> BuilderResult<Option<String>> {
        let top = self.current()?;
        let name = as_string(&name.into(), "");
        Ok(doc.attribute(top, &name).map(str::to_string))
    }

    pub fn add_class(&mut self, doc: &mut Document, name: impl Into<Value>) -> BuilderResult<()> {
        let top = self.current()?;
        doc.add_class(top, &as_string(&name.into(), ""));
        Ok(())
    }

    pub fn add_classes(&mut self, doc: &mut Document, classes: &Value) -> BuilderResult<()> {
        let Some(items) = classes.as_seq() else {
            return Err(BuilderError::InvalidInput {
                expected: "a sequence of class names",
            });
        };
        for name in items {
            self.add_class(doc, name.clone())?;
        }
        Ok(())
    }

    pub fn set_id(&mut self, doc: &mut Document, id: impl Into<Value>) -> BuilderResult<()> {
        let top = self.current()?;
        doc.set_id(top, &as_string(&id.into(), ""));
        Ok(())
    }

    /// Sets a property on the current top through a dotted path; see
    /// [`Document::set_path_property`] for the path rules and the silent
    /// no-op on missing intermediates.
    pub fn set_property(
        &mut self,
        doc: &mut Document,
        path: &str,
        value: impl Into<Value>,
    ) -> BuilderResult<()> {
        let top = self.current()?;
        doc.set_path_property(top, path, value.into());
        Ok(())
    }

    /// Applies each entry of a property map independently, in insertion
    /// order.
    pub fn set_properties(&mut self, doc: &mut Document, properties: &Value) -> BuilderResult<()> {
        let Some(pairs) = properties.as_map() else {
            return Err(BuilderError::InvalidInput {
                expected: "a map of properties",
            });
        };
        for (path, value) in pairs {
            self.set_property(doc, path, value.clone())?;
        }
        Ok(())
    }

    pub fn get_property(&self, doc: &Document, name: &str) -> BuilderResult<Value> {
        let top = self.current()?;
        Ok(doc.get_plain_property(top, name))
    }

    fn current(&self) -> BuilderResult<NodeKey> {
        if !self.active {
            return Err(BuilderError::NotActive);
        }
        self.stack.top().ok_or(BuilderError::NotActive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::Viewport;

    fn doc() -> Document {
        Document::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn balanced_session_builds_a_nested_tree() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();

        let base = builder.start(&doc, None).unwrap();
        assert_eq!(base, doc.root());

        let outer = builder.start_element(&mut doc, "div").unwrap();
        let inner = builder.start_element(&mut doc, "span").unwrap();
        builder.end_element().unwrap();
        builder.end_element().unwrap();
        builder.end().unwrap();

        assert!(!builder.is_active());
        assert_eq!(builder.depth(), 0);
        assert_eq!(doc.children(base), &[outer]);
        assert_eq!(doc.children(outer), &[inner]);
    }

    #[test]
    fn invalid_start_hint_falls_back_to_the_body() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        let base = builder.start(&doc, Some(NodeKey(9999))).unwrap();
        assert_eq!(base, doc.root());
        builder.end().unwrap();
    }

    #[test]
    fn unmatched_start_element_reports_leftover_count() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        builder.start(&doc, None).unwrap();
        builder.start_element(&mut doc, "div").unwrap();

        assert_eq!(
            builder.end(),
            Err(BuilderError::UnbalancedSession { leftover: 1 })
        );
        // The failed end leaves the session open.
        assert!(builder.is_active());
    }

    #[test]
    fn reentrant_start_and_inactive_operations_fail() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();

        assert_eq!(builder.end(), Err(BuilderError::NotActive));
        assert_eq!(
            builder.start_element(&mut doc, "div"),
            Err(BuilderError::NotActive)
        );
        let orphan = doc.create_element("div").unwrap();
        assert_eq!(builder.push(&mut doc, orphan), Err(BuilderError::NotActive));
        assert_eq!(builder.pop(), Err(BuilderError::NotActive));

        builder.start(&doc, None).unwrap();
        assert_eq!(builder.start(&doc, None), Err(BuilderError::AlreadyActive));
        builder.end().unwrap();
    }

    #[test]
    fn element_creation_failure_surfaces_the_tag() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        builder.start(&doc, None).unwrap();
        assert_eq!(
            builder.start_element(&mut doc, "bad tag"),
            Err(BuilderError::ElementCreationFailed {
                tag: "bad tag".to_string()
            })
        );
    }

    #[test]
    fn start_push_and_end_pop_report_their_dispatch() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        let node = doc.create_element("div").unwrap();

        assert_eq!(
            builder.start_push(&mut doc, node).unwrap(),
            StartPush::Started(node)
        );
        let child = doc.create_element("div").unwrap();
        assert_eq!(
            builder.start_push(&mut doc, child).unwrap(),
            StartPush::Pushed
        );
        assert_eq!(doc.parent(child), Some(node));

        assert_eq!(builder.end_pop().unwrap(), EndPop::Popped);
        assert_eq!(builder.end_pop().unwrap(), EndPop::Ended);
        assert!(!builder.is_active());
    }

    #[test]
    fn ensure_top_reports_whether_a_push_is_owed() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();

        builder.start(&doc, None).unwrap();
        let node = builder.start_element(&mut doc, "div").unwrap();
        assert!(!builder.ensure_top(&mut doc, node).unwrap());
        assert_eq!(builder.depth(), 2);

        let other = doc.create_element("div").unwrap();
        assert!(builder.ensure_top(&mut doc, other).unwrap());
        assert_eq!(builder.depth(), 3);
        builder.end_pop().unwrap();

        builder.end_element().unwrap();
        builder.end().unwrap();
    }

    #[test]
    fn setters_address_the_top_of_the_stack() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        builder.start(&doc, None).unwrap();
        let node = builder.start_element(&mut doc, "input").unwrap();

        builder.set_attribute(&mut doc, "name", "query").unwrap();
        builder.set_attribute(&mut doc, "tabindex", 3).unwrap();
        builder
            .set_attributes(&mut doc, &Value::map([("role", "listbox")]))
            .unwrap();
        builder.add_class(&mut doc, "field").unwrap();
        builder
            .add_classes(&mut doc, &Value::seq(["wide", "focused"]))
            .unwrap();
        builder.set_id(&mut doc, "search").unwrap();
        builder.set_property(&mut doc, "style.width", "10px").unwrap();

        assert_eq!(doc.attribute(node, "name"), Some("query"));
        assert_eq!(doc.attribute(node, "tabindex"), Some("3"));
        assert_eq!(doc.attribute(node, "role"), Some("listbox"));
        assert_eq!(doc.classes(node), &["field", "wide", "focused"]);
        assert_eq!(doc.id(node), "search");
        assert_eq!(doc.style(node, "width"), Some("10px"));
        assert_eq!(
            builder.get_attribute(&doc, "name").unwrap(),
            Some("query".to_string())
        );
    }

    #[test]
    fn batch_setters_reject_non_collections() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        builder.start(&doc, None).unwrap();
        builder.start_element(&mut doc, "div").unwrap();

        assert!(matches!(
            builder.set_attributes(&mut doc, &Value::from("nope")),
            Err(BuilderError::InvalidInput { .. })
        ));
        assert!(matches!(
            builder.add_classes(&mut doc, &Value::from(1.0)),
            Err(BuilderError::InvalidInput { .. })
        ));
        assert!(matches!(
            builder.set_properties(&mut doc, &Value::Null),
            Err(BuilderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn dotted_property_with_missing_intermediate_is_silently_ignored() {
        let mut doc = doc();
        let mut builder = TreeBuilder::new();
        builder.start(&doc, None).unwrap();
        let node = builder.start_element(&mut doc, "div").unwrap();

        builder
            .set_property(&mut doc, "style.fake.deeper", "x")
            .unwrap();
        assert!(doc.style(node, "fake").is_none());
        assert_eq!(doc.get_plain_property(node, "style"), Value::Null);
    }
}
