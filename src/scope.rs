//! Dialog data scopes.
//!
//! Each open dialog owns a child scope created from a caller-supplied
//! parent (or the controller's root scope). The scope carries the
//! `dialog_data` payload, named variables inherited from its parent, and a
//! close-request channel so code bound to the dialog can close it without
//! holding a reference to the controller. A scope is destroyed exactly
//! once, during close teardown.

use crate::options::DataPayload;
use crate::registry::DialogId;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct Scope {
    serial: u64,
    parent: Option<u64>,
    vars: Map<String, Value>,
    dialog_data: Option<DataPayload>,
    close_channel: Option<(DialogId, mpsc::UnboundedSender<DialogId>)>,
    destroyed: bool,
}

impl Scope {
    /// The process-root scope. Dialogs opened without an explicit parent
    /// scope get children of this one.
    pub fn root() -> Self {
        Self {
            serial: 0,
            parent: None,
            vars: Map::new(),
            dialog_data: None,
            close_channel: None,
            destroyed: false,
        }
    }

    /// Create a child scope. Variables are inherited by value; the child's
    /// lifetime is independent of the parent's.
    pub fn child(&self, serial: u64) -> Self {
        Self {
            serial,
            parent: Some(self.serial),
            vars: self.vars.clone(),
            dialog_data: None,
            close_channel: None,
            destroyed: false,
        }
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set_dialog_data(&mut self, data: DataPayload) {
        self.dialog_data = Some(data);
    }

    pub fn dialog_data(&self) -> Option<&DataPayload> {
        self.dialog_data.as_ref()
    }

    /// Wire up the close-request channel for the owning dialog.
    pub(crate) fn attach_close_channel(
        &mut self,
        id: DialogId,
        sender: mpsc::UnboundedSender<DialogId>,
    ) {
        self.close_channel = Some((id, sender));
    }

    /// Request that the owning dialog be closed. Routed back to the
    /// controller and handled on its next `tick`. No-op on a destroyed
    /// scope or one not owned by a dialog.
    pub fn close_this_dialog(&self) {
        if self.destroyed {
            return;
        }
        if let Some((id, sender)) = &self.close_channel {
            let _ = sender.send(*id);
        }
    }

    /// Tear the scope down. Idempotent; the lifecycle guarantees it is
    /// reached exactly once per dialog.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        tracing::trace!(scope = self.serial, "destroying dialog scope");
        self.destroyed = true;
        self.vars.clear();
        self.dialog_data = None;
        self.close_channel = None;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_child_inherits_vars() {
        let mut root = Scope::root();
        root.set_var("user", json!("ada"));

        let child = root.child(1);
        assert_eq!(child.parent(), Some(0));
        assert_eq!(child.var("user"), Some(&json!("ada")));
        // inheritance is by value
        assert_eq!(root.var("user"), Some(&json!("ada")));
    }

    #[test]
    fn test_destroy_clears_state_once() {
        let mut scope = Scope::root().child(1);
        scope.set_var("k", json!(1));
        scope.set_dialog_data(DataPayload::Raw("payload".into()));

        scope.destroy();
        assert!(scope.is_destroyed());
        assert!(scope.var("k").is_none());
        assert!(scope.dialog_data().is_none());

        // second destroy stays a no-op
        scope.destroy();
        assert!(scope.is_destroyed());
    }

    #[tokio::test]
    async fn test_close_this_dialog_routes_owning_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::root().child(1);
        let id = DialogId::from_serial(7);
        scope.attach_close_channel(id, tx);

        scope.close_this_dialog();
        assert_eq!(rx.recv().await, Some(id));
    }

    #[tokio::test]
    async fn test_destroyed_scope_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::root().child(1);
        scope.attach_close_channel(DialogId::from_serial(7), tx);

        scope.destroy();
        scope.close_this_dialog();
        assert!(rx.try_recv().is_err());
    }
}
