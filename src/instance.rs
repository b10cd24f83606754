//! One open modal: its root element, owned scope, and resolved options.

use crate::options::DialogOptions;
use crate::registry::DialogId;
use crate::scope::Scope;

/// Per-instance teardown state machine. `Closing` exists only when the
/// host supports animation-completion events; otherwise close moves an
/// instance straight to `Destroyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    Open,
    /// Exit animation playing; scope and element survive until the
    /// animation-completion signal arrives
    Closing,
    Destroyed,
}

/// A dialog created by a successful `open` call. Exactly one instance
/// exists per open id; the instance is mutated only by teardown and
/// destroyed exactly once by close.
#[derive(Debug)]
pub struct DialogInstance {
    id: DialogId,
    /// Element id of the dialog root in the document
    root: String,
    scope: Scope,
    options: DialogOptions,
    teardown: Teardown,
}

impl DialogInstance {
    pub fn new(id: DialogId, scope: Scope, options: DialogOptions) -> Self {
        Self {
            id,
            root: id.element_id(),
            scope,
            options,
            teardown: Teardown::Open,
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    pub fn teardown(&self) -> Teardown {
        self.teardown
    }

    pub(crate) fn begin_closing(&mut self) {
        self.teardown = Teardown::Closing;
    }

    /// Final transition: destroy the scope and mark the instance dead.
    /// Safe to call from either `Open` (immediate teardown) or `Closing`
    /// (animation completed).
    pub(crate) fn destroy(&mut self) {
        self.scope.destroy();
        self.teardown = Teardown::Destroyed;
    }
}
