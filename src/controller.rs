//! Lifecycle controller: orchestrates dialog open and close.
//!
//! Open: resolve template → build markup → mount → register → bind
//! listeners → notify. Close: unbind listeners → deregister → play the
//! exit animation if the host supports animation-completion events →
//! destroy scope → unmount → notify.
//!
//! The controller runs on a single logical event loop. Its only suspension
//! points are template resolution inside `open`, the deferred bind drained
//! by [`DialogController::tick`], and the host's
//! [`DialogController::animation_complete`] signal.

use crate::capability::Capabilities;
use crate::dom::{class, Document, Element, KeyUp, PointerEvent, ESCAPE_KEY};
use crate::error::{DialogError, DialogResult};
use crate::events::{DialogEvent, EventBus};
use crate::instance::DialogInstance;
use crate::options::DialogOptions;
use crate::registry::{DialogId, DialogRegistry};
use crate::scope::Scope;
use crate::template::{TemplateLoader, TemplateResolver};
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;

/// Compiles mounted markup against its scope, producing a live bound
/// element. Called once per open, one tick after the element is inserted
/// into the document.
pub trait MarkupCompiler: Send {
    fn compile(&mut self, document: &mut Document, root: &str, scope: &Scope)
        -> anyhow::Result<()>;
}

/// Default compiler: records the scope binding on the root element.
#[derive(Debug, Default)]
pub struct BindingCompiler;

impl MarkupCompiler for BindingCompiler {
    fn compile(
        &mut self,
        document: &mut Document,
        root: &str,
        scope: &Scope,
    ) -> anyhow::Result<()> {
        let element = document
            .element_by_id_mut(root)
            .ok_or_else(|| anyhow::anyhow!("dialog root '{root}' not in document"))?;
        element.mark_bound(scope.serial());
        Ok(())
    }
}

/// Handle returned by a successful `open`, usable for chaining a close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogHandle {
    pub id: DialogId,
    /// Element id of the dialog root
    pub root: String,
}

pub struct DialogController {
    registry: DialogRegistry,
    resolver: TemplateResolver,
    document: Document,
    compiler: Box<dyn MarkupCompiler>,
    capabilities: Capabilities,
    events: EventBus,
    defaults: DialogOptions,
    root_scope: Scope,
    scope_serial: u64,
    /// Dialogs whose markup↔scope bind is scheduled for the next tick
    deferred_binds: VecDeque<DialogId>,
    close_requests_tx: mpsc::UnboundedSender<DialogId>,
    close_requests_rx: mpsc::UnboundedReceiver<DialogId>,
    /// Instances in `Closing`: deregistered, exit animation playing,
    /// destruction deferred to `animation_complete`
    pending_destroy: HashMap<DialogId, DialogInstance>,
    latest: Option<DialogHandle>,
}

impl DialogController {
    pub fn new(loader: Box<dyn TemplateLoader>) -> Self {
        let (close_requests_tx, close_requests_rx) = mpsc::unbounded_channel();
        Self {
            registry: DialogRegistry::new(),
            resolver: TemplateResolver::new(loader),
            document: Document::new(),
            compiler: Box::new(BindingCompiler),
            capabilities: Capabilities::default(),
            events: EventBus::new(),
            defaults: DialogOptions::default(),
            root_scope: Scope::root(),
            scope_serial: 0,
            deferred_binds: VecDeque::new(),
            close_requests_tx,
            close_requests_rx,
            pending_destroy: HashMap::new(),
            latest: None,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_compiler(mut self, compiler: Box<dyn MarkupCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_defaults(mut self, defaults: DialogOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// A fresh copy of the controller defaults, for callers to layer
    /// per-open overrides on. Mutating the copy never affects the
    /// defaults of other calls.
    pub fn defaults(&self) -> DialogOptions {
        self.defaults.clone()
    }

    pub fn resolver_mut(&mut self) -> &mut TemplateResolver {
        &mut self.resolver
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn open_count(&self) -> usize {
        self.registry.open_count()
    }

    pub fn open_ids(&self) -> Vec<DialogId> {
        self.registry.ids()
    }

    pub fn instance(&self, id: DialogId) -> Option<&DialogInstance> {
        self.registry.get(id)
    }

    /// Whether the dialog's exit animation is still playing.
    pub fn is_closing(&self, id: DialogId) -> bool {
        self.pending_destroy.contains_key(&id)
    }

    /// Handle of the most recently opened dialog.
    pub fn latest(&self) -> Option<&DialogHandle> {
        self.latest.as_ref()
    }

    /// Subscribe to `Opened`/`Closed` notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DialogEvent> {
        self.events.subscribe()
    }

    /// Open a dialog.
    ///
    /// Template resolution is the single suspension point; everything
    /// after it runs only once resolution succeeds. On failure no
    /// instance is created, no listeners are bound, no notification is
    /// emitted and no element reaches the document.
    pub async fn open(&mut self, options: DialogOptions) -> DialogResult<DialogHandle> {
        let id = self.registry.allocate_id();
        self.scope_serial += 1;
        let mut scope = match &options.scope {
            Some(parent) => parent.child(self.scope_serial),
            None => self.root_scope.child(self.scope_serial),
        };

        let markup = self
            .resolver
            .resolve(options.template.as_deref(), options.plain)
            .await?;

        if let Some(data) = options.data.clone() {
            scope.set_dialog_data(data.parsed()?);
        }
        scope.attach_close_channel(id, self.close_requests_tx.clone());

        let mut content = Element::new().with_class(class::CONTENT).with_markup(markup);
        if options.show_close {
            content = content.with_child(Element::new().with_class(class::CLOSE));
        }
        let mut root = Element::new()
            .with_id(id.element_id())
            .with_class(class::ROOT)
            .with_child(Element::new().with_class(class::OVERLAY))
            .with_child(content);
        for name in options.class_name.split_whitespace() {
            root.add_class(name);
        }
        if let Some(controller) = &options.controller {
            root = root.with_controller(controller.clone());
        }

        // Mount first: the deferred bind must see the element already
        // attached to the document.
        self.document.append_to_body(root);
        self.document.add_body_class(class::BODY_OPEN);
        self.deferred_binds.push_back(id);

        if options.close_by_escape && !self.document.keyup_attached() {
            self.document.attach_keyup();
        }
        let root_id = id.element_id();
        if options.close_by_document {
            self.document.bind_pointer(&root_id, self.capabilities.pointer);
        }

        self.registry
            .register(DialogInstance::new(id, scope, options));
        self.events.broadcast(DialogEvent::Opened {
            id,
            root: root_id.clone(),
        });
        tracing::debug!(%id, open_count = self.registry.open_count(), "dialog opened");

        let handle = DialogHandle { id, root: root_id };
        self.latest = Some(handle.clone());
        Ok(handle)
    }

    /// Close by element id. A miss is reinterpreted as a request to close
    /// every open dialog; this quirk is part of the public contract (use
    /// [`DialogController::close_by_id`] for the strict variant).
    pub fn close(&mut self, id: &str) {
        match DialogId::from_element_id(id).filter(|found| self.registry.contains(*found)) {
            Some(found) => self.close_instance(found),
            None => {
                tracing::warn!(id, "close target not found, closing all open dialogs");
                self.close_all();
            }
        }
    }

    /// Close exactly the given dialog. Returns false if it is not open.
    pub fn close_by_id(&mut self, id: DialogId) -> bool {
        if self.registry.contains(id) {
            self.close_instance(id);
            true
        } else {
            false
        }
    }

    /// Close every currently registered instance. Each teardown is
    /// independent and order-insensitive.
    pub fn close_all(&mut self) {
        for id in self.registry.ids() {
            self.close_instance(id);
        }
    }

    fn close_instance(&mut self, id: DialogId) {
        let Some(mut instance) = self.registry.deregister(id) else {
            return;
        };
        let root = instance.root().to_string();

        self.document.unbind_pointer(&root);
        // last dialog out detaches the shared keyup listener and clears
        // the body marker, exactly once
        if self.registry.is_empty() {
            if self.document.keyup_attached() {
                self.document.detach_keyup();
            }
            self.document.remove_body_class(class::BODY_OPEN);
        }

        if self.capabilities.animation_end {
            if let Some(element) = self.document.element_by_id_mut(&root) {
                element.add_class(class::CLOSING);
            }
            instance.begin_closing();
            self.pending_destroy.insert(id, instance);
        } else {
            instance.destroy();
            self.document.remove_by_id(&root);
        }

        self.events.broadcast(DialogEvent::Closed {
            id,
            root: root.clone(),
        });
        tracing::debug!(%id, open_count = self.registry.open_count(), "dialog closed");
    }

    /// Host signal that a dialog's exit animation completed. Fires the
    /// `Closing` → `Destroyed` transition exactly once; repeated
    /// animation iterations are no-ops.
    pub fn animation_complete(&mut self, id: DialogId) {
        let Some(mut instance) = self.pending_destroy.remove(&id) else {
            return;
        };
        let root = instance.root().to_string();
        instance.destroy();
        self.document.remove_by_id(&root);
        tracing::trace!(%id, "exit animation finished, dialog destroyed");
    }

    /// Run one turn of the controller's event loop: execute deferred
    /// markup↔scope binds and drain scope-originated close requests.
    pub fn tick(&mut self) -> DialogResult<()> {
        while let Some(id) = self.deferred_binds.pop_front() {
            // a dialog closed before its bind tick leaves a dangling
            // continuation, which is a no-op
            let Some(instance) = self.registry.get(id) else {
                continue;
            };
            let root = instance.root().to_string();
            let scope = instance.scope().clone();
            self.compiler
                .compile(&mut self.document, &root, &scope)
                .map_err(DialogError::Compile)?;
        }

        while let Ok(id) = self.close_requests_rx.try_recv() {
            self.close_by_id(id);
        }
        Ok(())
    }

    /// Document-level keyup arbitration. Escape closes open dialogs; the
    /// handler is live only while the shared listener is attached.
    pub fn dispatch_keyup(&mut self, key: KeyUp) {
        if !self.document.keyup_attached() {
            return;
        }
        if key.key_code == ESCAPE_KEY {
            self.close_all();
        }
    }

    /// Per-dialog pointer arbitration. A tap on the overlay region or the
    /// close affordance closes that specific dialog; taps inside the
    /// content area never do.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) {
        if !self.document.pointer_bound(&event.root) {
            return;
        }
        if event.hits_overlay() || event.hits_close_affordance() {
            self.close(&event.root);
        }
    }
}
