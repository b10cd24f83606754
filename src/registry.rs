//! Registry of currently open dialog instances.
//!
//! Owns the monotonic id allocator and the table of open instances keyed
//! by id. The open-count derived from this table gates the shared document
//! listeners: the transition 0→1 attaches them, 1→0 detaches them.

use crate::instance::DialogInstance;
use std::collections::HashMap;

/// Generated identifier for one dialog instance. Serials come from a
/// process-wide monotonic counter and are never reused, even after close.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct DialogId(u64);

impl DialogId {
    pub fn from_serial(serial: u64) -> Self {
        Self(serial)
    }

    pub fn serial(&self) -> u64 {
        self.0
    }

    /// The element id carried by this dialog's root in the document.
    pub fn element_id(&self) -> String {
        format!("scrim-{}", self.0)
    }

    /// Parse an element id (`scrim-{serial}`) back into a dialog id.
    pub fn from_element_id(element_id: &str) -> Option<Self> {
        let serial = element_id.strip_prefix("scrim-")?.parse().ok()?;
        Some(Self(serial))
    }
}

impl std::fmt::Display for DialogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element_id())
    }
}

/// Table of open dialog instances.
#[derive(Debug, Default)]
pub struct DialogRegistry {
    next_serial: u64,
    instances: HashMap<DialogId, DialogInstance>,
    /// Open ids in registration order
    order: Vec<DialogId>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next dialog id. Ids are monotonic and never recycled;
    /// an aborted open simply leaves a gap.
    pub fn allocate_id(&mut self) -> DialogId {
        self.next_serial += 1;
        DialogId::from_serial(self.next_serial)
    }

    pub fn register(&mut self, instance: DialogInstance) {
        let id = instance.id();
        self.instances.insert(id, instance);
        self.order.push(id);
    }

    pub fn deregister(&mut self, id: DialogId) -> Option<DialogInstance> {
        let instance = self.instances.remove(&id)?;
        self.order.retain(|open| *open != id);
        Some(instance)
    }

    pub fn contains(&self, id: DialogId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn get(&self, id: DialogId) -> Option<&DialogInstance> {
        self.instances.get(&id)
    }

    /// Number of currently open dialogs.
    pub fn open_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Open ids in registration order.
    pub fn ids(&self) -> Vec<DialogId> {
        self.order.clone()
    }
}
