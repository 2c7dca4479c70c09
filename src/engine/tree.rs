//! Widget Tree - Arena storage for widgets.
//!
//! Manages the lifecycle of widget handles:
//! - Generation-checked [`WidgetId`] allocation (stale handles never resolve)
//! - Parent/children links (insertion order is significant for layout)
//! - Per-widget runtime state: scroll offset, mounted flag, scrollbar chrome
//! - Render generations, bumped by [`WidgetTree::refresh`]

use slotmap::{SlotMap, new_key_type};

use super::widget::Widget;
use crate::error::ArrangeError;
use crate::geometry::Offset;
use crate::styles::Styles;

new_key_type! {
    /// Handle to a widget in a [`WidgetTree`].
    pub struct WidgetId;
}

// =============================================================================
// Scrollbar Chrome
// =============================================================================

/// Scrollbar widgets owned by a scrollable container.
///
/// Chrome widgets are not children: they are placed directly over the
/// container's region, above all of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarChrome {
    pub vertical: Option<WidgetId>,
    pub horizontal: Option<WidgetId>,
    pub corner: Option<WidgetId>,
}

impl ScrollbarChrome {
    /// True if no chrome widget is registered.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none() && self.corner.is_none()
    }

    fn ids(self) -> impl Iterator<Item = WidgetId> {
        [self.vertical, self.horizontal, self.corner]
            .into_iter()
            .flatten()
    }
}

// =============================================================================
// Nodes
// =============================================================================

struct WidgetNode {
    widget: Box<dyn Widget>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    scroll_offset: Offset,
    mounted: bool,
    scrollbars: ScrollbarChrome,
    render_generation: u64,
}

impl WidgetNode {
    fn new(widget: Box<dyn Widget>, parent: Option<WidgetId>) -> Self {
        Self {
            widget,
            parent,
            children: Vec::new(),
            scroll_offset: Offset::ZERO,
            mounted: true,
            scrollbars: ScrollbarChrome::default(),
            render_generation: 0,
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

/// Owner of every widget.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    root: Option<WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets, including detached chrome.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    // -------------------------------------------------------------------------
    // Insertion / removal
    // -------------------------------------------------------------------------

    /// Insert the root widget. Replaces (and removes) any previous root.
    pub fn insert_root(&mut self, widget: impl Widget + 'static) -> WidgetId {
        if let Some(old) = self.root.take() {
            self.remove(old);
        }
        let id = self.nodes.insert(WidgetNode::new(Box::new(widget), None));
        self.root = Some(id);
        id
    }

    /// Append a child to `parent`.
    pub fn insert_child(
        &mut self,
        parent: WidgetId,
        widget: impl Widget + 'static,
    ) -> Result<WidgetId, ArrangeError> {
        if !self.nodes.contains_key(parent) {
            return Err(ArrangeError::StaleHandle(parent));
        }
        let id = self
            .nodes
            .insert(WidgetNode::new(Box::new(widget), Some(parent)));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Insert a widget with no parent, for use as scrollbar chrome.
    pub fn insert_detached(&mut self, widget: impl Widget + 'static) -> WidgetId {
        self.nodes.insert(WidgetNode::new(Box::new(widget), None))
    }

    /// Remove a widget, its descendants and its chrome.
    ///
    /// Returns false if the handle was already stale.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|&child| child != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut stack: Vec<WidgetId> = node.children;
        stack.extend(node.scrollbars.ids());
        while let Some(next) = stack.pop() {
            if let Some(removed) = self.nodes.remove(next) {
                stack.extend(removed.children);
                stack.extend(removed.scrollbars.ids());
            }
        }
        true
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id).map(|node| node.widget.as_ref())
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id).map(|node| node.widget.as_mut())
    }

    /// Widget for layout purposes: must resolve and be mounted.
    pub fn mounted(&self, id: WidgetId) -> Result<&dyn Widget, ArrangeError> {
        let node = self.nodes.get(id).ok_or(ArrangeError::StaleHandle(id))?;
        if !node.mounted {
            return Err(ArrangeError::NotMounted(id));
        }
        Ok(node.widget.as_ref())
    }

    /// Styles of a mounted widget.
    pub fn styles(&self, id: WidgetId) -> Result<&Styles, ArrangeError> {
        self.mounted(id).map(|widget| widget.styles())
    }

    /// Children in insertion order (empty for stale handles).
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    // -------------------------------------------------------------------------
    // Runtime state
    // -------------------------------------------------------------------------

    pub fn scroll_offset(&self, id: WidgetId) -> Offset {
        self.nodes
            .get(id)
            .map(|node| node.scroll_offset)
            .unwrap_or_default()
    }

    pub fn set_scroll_offset(&mut self, id: WidgetId, offset: Offset) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scroll_offset = offset;
        }
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.mounted)
    }

    pub fn set_mounted(&mut self, id: WidgetId, mounted: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.mounted = mounted;
        }
    }

    pub fn scrollbars(&self, id: WidgetId) -> ScrollbarChrome {
        self.nodes
            .get(id)
            .map(|node| node.scrollbars)
            .unwrap_or_default()
    }

    /// Register scrollbar chrome for a container.
    pub fn set_scrollbars(&mut self, id: WidgetId, chrome: ScrollbarChrome) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scrollbars = chrome;
        }
    }

    /// Current render generation; cached renders from older generations are stale.
    pub fn render_generation(&self, id: WidgetId) -> u64 {
        self.nodes
            .get(id)
            .map(|node| node.render_generation)
            .unwrap_or_default()
    }

    /// Mark a widget's content as changed.
    pub fn refresh(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.render_generation = node.render_generation.wrapping_add(1);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
