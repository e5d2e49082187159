use builder::{BuilderError, BuilderResult, TreeBuilder};
use dom::{Document, NodeKey};
use events::{EventHub, EventSource, HookOutcome, Permanence, UiEvent};
use tools::{Value, as_string};

/// Class set on every dropdown container.
pub const CONTAINER_CLASS: &str = "dropdown_container";
/// Class set on every dropdown row.
pub const ROW_CLASS: &str = "dropdown_row";

/// Layout properties applied to every freshly built dropdown.
#[derive(Clone, Debug)]
pub struct DropdownConfig {
    pub default_properties: Value,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            default_properties: Value::map([
                ("style.position", Value::from("absolute")),
                ("style.z-index", Value::from(i32::MAX)),
            ]),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct DropdownEntry {
    node: NodeKey,
    anchor: Option<NodeKey>,
}

/// Builds, registers, positions and tears down dropdown widgets.
///
/// The registry lives on the manager instance; whatever drives the event
/// loop owns one manager per page and passes it to the hooks registered by
/// [`hook_viewport_events`].
#[derive(Debug, Default)]
pub struct DropdownManager {
    builder: TreeBuilder,
    config: DropdownConfig,
    registry: Vec<DropdownEntry>,
}

impl DropdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DropdownConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn dropdown_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, dropdown: NodeKey) -> bool {
        self.registry.iter().any(|e| e.node == dropdown)
    }

    /// The anchor a dropdown is attached to, if any.
    pub fn anchor_of(&self, dropdown: NodeKey) -> Option<NodeKey> {
        self.registry
            .iter()
            .find(|e| e.node == dropdown)
            .and_then(|e| e.anchor)
    }

    /// Reverse lookup: the dropdown attached to an anchor, if any.
    pub fn dropdown_for_anchor(&self, anchor: NodeKey) -> Option<NodeKey> {
        self.registry
            .iter()
            .find(|e| e.anchor == Some(anchor))
            .map(|e| e.node)
    }

    /// Builds a dropdown with one row per option, registers it, and hands
    /// it to `on_ready` before returning it. `options` must be a sequence;
    /// each option is coerced to the row's text.
    pub fn create_dropdown(
        &mut self,
        doc: &mut Document,
        options: &Value,
        on_ready: Option<&mut dyn FnMut(NodeKey)>,
    ) -> BuilderResult<NodeKey> {
        let Some(options) = options.as_seq() else {
            return Err(BuilderError::InvalidInput {
                expected: "a sequence of options",
            });
        };

        self.builder.start(doc, None)?;
        let container = self.builder.start_element(doc, "div")?;
        self.builder.add_class(doc, CONTAINER_CLASS)?;
        self.set_dropdown_properties(doc, container)?;

        for option in options {
            let row = self.create_row(doc, option)?;
            if !doc.is_live(row) {
                log::error!(target: "dropdown", "failed to build row for {option:?}");
                continue;
            }
            self.builder.push(doc, row)?;
            self.builder.pop()?;
        }

        self.builder.end_element()?;
        self.builder.end()?;

        self.registry.push(DropdownEntry {
            node: container,
            anchor: None,
        });

        if let Some(on_ready) = on_ready {
            on_ready(container);
        }

        Ok(container)
    }

    /// Applies the configured default layout properties to a dropdown.
    pub fn set_dropdown_properties(
        &mut self,
        doc: &mut Document,
        dropdown: NodeKey,
    ) -> BuilderResult<()> {
        if !doc.is_live(dropdown) {
            return Err(BuilderError::InvalidInput {
                expected: "a live dropdown node",
            });
        }

        let pushed = self.builder.ensure_top(doc, dropdown)?;
        self.builder
            .set_properties(doc, &self.config.default_properties)?;
        if pushed {
            self.builder.end_pop()?;
        }
        Ok(())
    }

    fn create_row(&mut self, doc: &mut Document, text: &Value) -> BuilderResult<NodeKey> {
        let text = as_string(text, "");
        let row = doc
            .create_element("div")
            .ok_or(BuilderError::ElementCreationFailed {
                tag: "div".to_string(),
            })?;

        let pushed = self.builder.ensure_top(doc, row)?;
        self.builder.add_class(doc, ROW_CLASS)?;
        self.builder.set_property(doc, "text", text)?;
        if pushed {
            self.builder.end_pop()?;
        }

        Ok(row)
    }

    /// Attaches a dropdown to an anchor, or detaches it when `anchor` is
    /// `None` or no longer live. A live anchor is stolen from any other
    /// entry holding it, so the pair stays one-to-one. Always ends with a
    /// fix pass.
    pub fn attach_to_element(
        &mut self,
        doc: &mut Document,
        dropdown: NodeKey,
        anchor: Option<NodeKey>,
    ) -> BuilderResult<()> {
        if !doc.is_live(dropdown) {
            return Err(BuilderError::InvalidInput {
                expected: "a live dropdown node",
            });
        }

        let anchor = anchor.filter(|a| doc.is_live(*a));
        if anchor.is_some() {
            for entry in &mut self.registry {
                if entry.anchor == anchor {
                    entry.anchor = None;
                }
            }
        }
        match self.registry.iter_mut().find(|e| e.node == dropdown) {
            Some(entry) => entry.anchor = anchor,
            // A container built elsewhere joins the registry on attach.
            None => self.registry.push(DropdownEntry {
                node: dropdown,
                anchor,
            }),
        }

        self.fix_dropdowns(doc);
        Ok(())
    }

    /// Detaches a dropdown from the tree. The registry entry stays until
    /// the next fix pass prunes it. Silently ignores non-live input.
    pub fn close_dropdown(&mut self, doc: &mut Document, dropdown: NodeKey) {
        if !doc.is_attached(dropdown) {
            return;
        }
        doc.detach(dropdown);
    }

    /// Shows or hides a dropdown by writing its `display` style; the node
    /// stays valid either way. Silently ignores detached input.
    pub fn set_dropdown_visibility(
        &mut self,
        doc: &mut Document,
        dropdown: NodeKey,
        visible: bool,
    ) -> BuilderResult<()> {
        if !doc.is_attached(dropdown) {
            return Ok(());
        }

        let pushed = self.builder.ensure_top(doc, dropdown)?;
        let display = if visible { "unset" } else { "none" };
        self.builder.set_property(doc, "style.display", display)?;
        if pushed {
            self.builder.end_pop()?;
        }
        Ok(())
    }

    /// Visibility derived from the `display` style; `None` for detached
    /// input.
    pub fn get_dropdown_visibility(&self, doc: &Document, dropdown: NodeKey) -> Option<bool> {
        if !doc.is_attached(dropdown) {
            return None;
        }
        Some(doc.style(dropdown, "display") != Some("none"))
    }

    /// Flips visibility and returns the new state; `None` for detached
    /// input.
    pub fn toggle_dropdown_visibility(
        &mut self,
        doc: &mut Document,
        dropdown: NodeKey,
    ) -> BuilderResult<Option<bool>> {
        let Some(visible) = self.get_dropdown_visibility(doc, dropdown) else {
            return Ok(None);
        };
        self.set_dropdown_visibility(doc, dropdown, !visible)?;
        Ok(Some(!visible))
    }

    /// Re-lays out every registered dropdown, filtering the registry in
    /// place:
    ///
    /// 1. entries whose container left the tree are dropped (this is where
    ///    closed dropdowns disappear),
    /// 2. entries without an anchor are kept untouched,
    /// 3. entries whose anchor is no longer live are torn down and dropped,
    /// 4. the rest are positioned at their anchor's bottom-left corner and
    ///    sized against the anchor and the remaining viewport space.
    ///
    /// Running the pass twice without anchor movement computes identical
    /// geometry.
    pub fn fix_dropdowns(&mut self, doc: &mut Document) {
        self.registry.retain_mut(|entry| {
            if !doc.is_attached(entry.node) {
                return false;
            }

            let Some(anchor) = entry.anchor else {
                return true;
            };

            if !doc.is_live(anchor) {
                // The anchor went away under us; take the dropdown down too.
                log::debug!(
                    target: "dropdown.fix",
                    "anchor {anchor:?} went invalid, closing {:?}",
                    entry.node
                );
                doc.detach(entry.node);
                return false;
            }

            let rect = doc.bounding_rect(anchor);
            let top = rect.y + rect.height;
            let rows = doc.child_count(entry.node);
            let viewport = doc.viewport();

            doc.set_style(entry.node, "position", "absolute");
            doc.set_style(entry.node, "left", &format!("{}px", rect.x));
            doc.set_style(entry.node, "top", &format!("{top}px"));
            doc.set_style(entry.node, "min-width", &format!("{}px", rect.width));
            doc.set_style(entry.node, "min-height", &format!("calc({rows}em + 1px)"));
            doc.set_style(
                entry.node,
                "max-height",
                &format!("{}px", viewport.height - top),
            );

            true
        });
    }
}

/// Registers the fix pass as the handler for viewport resizes and document
/// scrolls, one permanent hook per event source. `select` projects the
/// embedder's context onto the manager and document the hooks should use.
pub fn hook_viewport_events<Ctx: 'static>(
    hub: &mut EventHub<Ctx>,
    select: fn(&mut Ctx) -> (&mut DropdownManager, &mut Document),
) {
    hub.hook(
        EventSource::Viewport,
        UiEvent::Resize,
        Permanence::Permanent,
        move |ctx, _| {
            let (manager, doc) = select(ctx);
            manager.fix_dropdowns(doc);
            HookOutcome::Done
        },
    );
    hub.hook(
        EventSource::Document,
        UiEvent::Scroll,
        Permanence::Permanent,
        move |ctx, _| {
            let (manager, doc) = select(ctx);
            manager.fix_dropdowns(doc);
            HookOutcome::Done
        },
    );
}
