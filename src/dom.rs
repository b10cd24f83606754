//! Minimal host-document model.
//!
//! The controller mounts dialog roots into a [`Document`]: an element tree
//! with body-level class markers, query-by-id, and explicit listener
//! bookkeeping (one shared document keyup listener plus one pointer handler
//! per dialog root). Hosts with a real document can mirror these operations;
//! tests observe them directly.

use crate::capability::PointerBackend;
use std::collections::BTreeSet;

/// Class names used on dialog markup.
pub mod class {
    /// Class on every dialog root element
    pub const ROOT: &str = "scrim";
    /// The backdrop region, distinct from the content area
    pub const OVERLAY: &str = "scrim-overlay";
    /// The content wrapper holding the resolved template markup
    pub const CONTENT: &str = "scrim-content";
    /// The injected close affordance
    pub const CLOSE: &str = "scrim-close";
    /// Added while the exit animation plays
    pub const CLOSING: &str = "scrim-closing";
    /// Body marker set while at least one dialog is open
    pub const BODY_OPEN: &str = "scrim-open";
}

/// Web keycode for the Escape key.
pub const ESCAPE_KEY: u32 = 27;

/// A document-level keyup event fed in by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUp {
    pub key_code: u32,
}

impl KeyUp {
    pub fn escape() -> Self {
        Self {
            key_code: ESCAPE_KEY,
        }
    }
}

/// A pointer tap/click event fed in by the host. `root` is the element id
/// of the dialog root containing the event target; `target_classes` are the
/// classes on the target element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub root: String,
    pub target_classes: Vec<String>,
}

impl PointerEvent {
    /// A click landing on the overlay region of the given dialog root.
    pub fn on_overlay(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            target_classes: vec![class::OVERLAY.to_string()],
        }
    }

    /// A click landing on the close affordance.
    pub fn on_close_affordance(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            target_classes: vec![class::CLOSE.to_string()],
        }
    }

    /// A click landing inside the content area.
    pub fn on_content(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            target_classes: vec![class::CONTENT.to_string()],
        }
    }

    pub fn hits_overlay(&self) -> bool {
        self.target_classes.iter().any(|c| c == class::OVERLAY)
    }

    pub fn hits_close_affordance(&self) -> bool {
        self.target_classes.iter().any(|c| c == class::CLOSE)
    }
}

/// One node in the document tree.
#[derive(Debug, Clone)]
pub struct Element {
    id: Option<String>,
    classes: Vec<String>,
    /// Declared controller binding on this element, if any
    controller: Option<String>,
    /// Raw inner markup for leaf content nodes
    markup: String,
    children: Vec<Element>,
    /// Serial of the scope this element was compiled against, set by the
    /// markup compiler once binding has run
    bound_scope: Option<u64>,
}

impl Element {
    pub fn new() -> Self {
        Self {
            id: None,
            classes: Vec::new(),
            controller: None,
            markup: String::new(),
            children: Vec::new(),
            bound_scope: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = markup.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        // class lists may repeat in markup; keep ours canonical
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn bound_scope(&self) -> Option<u64> {
        self.bound_scope
    }

    pub fn mark_bound(&mut self, scope_serial: u64) {
        self.bound_scope = Some(scope_serial);
    }

    /// Concatenated markup of this element's subtree, depth-first.
    pub fn inner_markup(&self) -> String {
        let mut out = self.markup.clone();
        for child in &self.children {
            out.push_str(&child.inner_markup());
        }
        out
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

/// The host document: body-level state plus the dialog roots appended to
/// the body, in insertion order.
#[derive(Debug, Default)]
pub struct Document {
    body_classes: BTreeSet<String>,
    body: Vec<Element>,
    keyup_attached: bool,
    pointer_bindings: BTreeSet<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body_class(&mut self, class: impl Into<String>) {
        self.body_classes.insert(class.into());
    }

    pub fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn append_to_body(&mut self, element: Element) {
        self.body.push(element);
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.iter().find(|e| e.id() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.iter_mut().find(|e| e.id() == Some(id))
    }

    /// Remove an element from the body, returning it if it was present.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Element> {
        let index = self.body.iter().position(|e| e.id() == Some(id))?;
        Some(self.body.remove(index))
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Attach the shared document keyup listener. At most one is ever
    /// attached; re-attaching is a no-op.
    pub fn attach_keyup(&mut self) {
        self.keyup_attached = true;
    }

    pub fn detach_keyup(&mut self) {
        self.keyup_attached = false;
    }

    pub fn keyup_attached(&self) -> bool {
        self.keyup_attached
    }

    /// Bind the per-root pointer handler through the selected backend.
    /// Native clicks and gesture taps are functionally equivalent.
    pub fn bind_pointer(&mut self, root: &str, backend: PointerBackend) {
        tracing::trace!(root, ?backend, "binding pointer handler");
        self.pointer_bindings.insert(root.to_string());
    }

    pub fn unbind_pointer(&mut self, root: &str) {
        self.pointer_bindings.remove(root);
    }

    pub fn pointer_bound(&self, root: &str) -> bool {
        self.pointer_bindings.contains(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_classes() {
        let mut document = Document::new();
        assert!(!document.body_has_class(class::BODY_OPEN));

        document.add_body_class(class::BODY_OPEN);
        assert!(document.body_has_class(class::BODY_OPEN));

        document.remove_body_class(class::BODY_OPEN);
        assert!(!document.body_has_class(class::BODY_OPEN));
    }

    #[test]
    fn test_element_queries() {
        let mut document = Document::new();
        document.append_to_body(Element::new().with_id("scrim-1").with_class(class::ROOT));
        document.append_to_body(Element::new().with_id("scrim-2").with_class(class::ROOT));

        assert_eq!(document.body_len(), 2);
        assert!(document.element_by_id("scrim-1").is_some());
        assert!(document.element_by_id("scrim-3").is_none());

        let removed = document.remove_by_id("scrim-1").unwrap();
        assert_eq!(removed.id(), Some("scrim-1"));
        assert_eq!(document.body_len(), 1);
        assert!(document.remove_by_id("scrim-1").is_none());
    }

    #[test]
    fn test_class_list_stays_canonical() {
        let mut element = Element::new().with_class("scrim");
        element.add_class("scrim");
        element.add_class("");
        assert_eq!(element.classes(), &["scrim".to_string()]);
    }

    #[test]
    fn test_inner_markup_walks_children() {
        let element = Element::new()
            .with_child(Element::new().with_class(class::OVERLAY))
            .with_child(
                Element::new()
                    .with_class(class::CONTENT)
                    .with_markup("<b>hi</b>"),
            );
        assert_eq!(element.inner_markup(), "<b>hi</b>");
    }

    #[test]
    fn test_pointer_bindings_are_per_root() {
        let mut document = Document::new();
        document.bind_pointer("scrim-1", PointerBackend::NativeClicks);
        assert!(document.pointer_bound("scrim-1"));
        assert!(!document.pointer_bound("scrim-2"));

        document.unbind_pointer("scrim-1");
        assert!(!document.pointer_bound("scrim-1"));
    }
}
